//! Great-circle distances on a spherical Earth.

use itertools::Itertools;

use crate::coord::round_to;
use crate::parser::Fix;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two positions given in decimal
/// degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` slightly above one for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance between two fixes in kilometers.
#[inline]
pub fn fix_distance(from: &Fix, to: &Fix) -> f64 {
    haversine(
        from.latitude_deg,
        from.longitude_deg,
        to.latitude_deg,
        to.longitude_deg,
    )
}

/// Sum of the distances between consecutive fixes, in full precision.
/// Fewer than two fixes travel no distance, i.e. exactly `+0.0`.
pub fn total_distance<'a, I>(fixes: I) -> f64
where
    I: IntoIterator<Item = &'a Fix>,
{
    fixes
        .into_iter()
        .tuple_windows()
        .map(|(a, b)| fix_distance(a, b))
        .fold(0.0, |acc, d| acc + d)
}

/// Rounds a distance to two decimals for reporting.
#[inline]
pub fn round_km(km: f64) -> f64 {
    round_to(km, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{FixDate, FixTime};

    fn fix(lat: f64, long: f64) -> Fix {
        Fix {
            date: FixDate {
                year: 2021,
                month: 6,
                day: 1,
            },
            time: FixTime {
                hour: 0,
                minute: 0,
                second: 0,
            },
            latitude_deg: lat,
            longitude_deg: long,
            speed_kmh: None,
            course_deg: None,
            altitude: None,
            timestamp: None,
        }
    }

    #[test]
    fn one_degree_at_equator() {
        let d = haversine(0.0, 0.0, 0.0, 1.0);
        assert_eq!(round_km(d), 111.19);
        assert_eq!(round_km(total_distance(&[fix(0.0, 0.0), fix(0.0, 1.0)])), 111.19);
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine(48.1, 11.5, 48.1, 11.5), 0.0);
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let d = haversine(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn short_sequences_travel_nothing() {
        let empty: Vec<Fix> = Vec::new();
        assert_eq!(total_distance(&empty), 0.0);
        assert_eq!(total_distance(&[fix(48.1, 11.5)]), 0.0);
        // an empty `sum()` of floats is `-0.0`, which prints as "-0.00"
        assert!(total_distance(&empty).is_sign_positive());
        assert!(total_distance(&[fix(48.1, 11.5)]).is_sign_positive());
        assert_eq!(format!("{:.2}", round_km(total_distance(&empty))), "0.00");
    }

    #[test]
    fn symmetric_under_reversal() {
        let track = vec![
            fix(48.1173, 11.5167),
            fix(48.2, 11.6),
            fix(48.25, 11.4),
            fix(47.9, 11.45),
        ];
        let forward = total_distance(&track);
        let backward = total_distance(track.iter().rev());
        assert!(forward > 0.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn accumulates_in_full_precision() {
        // three legs of 0.004 km each would round to 0.0 one by one
        let step = 0.004 / 111.194_926_644_558_73;
        let track: Vec<Fix> = (0..4).map(|i| fix(0.0, step * f64::from(i))).collect();
        assert_eq!(round_km(total_distance(&track)), 0.01);
    }
}
