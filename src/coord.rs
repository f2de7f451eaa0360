//! Conversions between the sexagesimal encoding transmitted by the receiver,
//! decimal degrees and a degrees/minutes/seconds (DMS) representation.

use std::fmt;
use std::str::FromStr;

use crate::err::CoordinateParseError;

pub const ABS_MAX_LAT: f64 = 90.0;
pub const ABS_MAX_LONG: f64 = 180.0;
/// Number of leading digits holding the degrees of a latitude field.
pub const LAT_SPLIT: usize = 2;
/// Number of leading digits holding the degrees of a longitude field.
pub const LONG_SPLIT: usize = 3;

const MAP_PLACE_URL: &str = "https://www.google.com/maps/place/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    #[inline]
    pub fn abs_max(self) -> f64 {
        match self {
            Axis::Latitude => ABS_MAX_LAT,
            Axis::Longitude => ABS_MAX_LONG,
        }
    }

    /// Number of digits holding the degrees in the sexagesimal field.
    #[inline]
    pub fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => LAT_SPLIT,
            Axis::Longitude => LONG_SPLIT,
        }
    }
}

/// The cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    North,
    South,
    East,
    West,
}

impl Cardinal {
    #[inline]
    pub fn get_sign(self) -> f64 {
        match self {
            Cardinal::North | Cardinal::East => 1.0,
            Cardinal::South | Cardinal::West => -1.0,
        }
    }

    #[inline]
    pub fn letter(self) -> char {
        match self {
            Cardinal::North => 'N',
            Cardinal::South => 'S',
            Cardinal::East => 'E',
            Cardinal::West => 'W',
        }
    }

    /// Parses the hemisphere field of a sentence. Only the letters valid for
    /// `axis` are accepted.
    pub fn from_field(field: &str, axis: Axis) -> Option<Self> {
        match (axis, field) {
            (Axis::Latitude, "N") => Some(Cardinal::North),
            (Axis::Latitude, "S") => Some(Cardinal::South),
            (Axis::Longitude, "E") => Some(Cardinal::East),
            (Axis::Longitude, "W") => Some(Cardinal::West),
            _ => None,
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Hemisphere of a signed decimal value. Zero belongs to the northern and
/// eastern hemispheres.
#[inline]
pub fn cardinal_of(value: f64, axis: Axis) -> Cardinal {
    match axis {
        Axis::Latitude if value >= 0.0 => Cardinal::North,
        Axis::Latitude => Cardinal::South,
        Axis::Longitude if value >= 0.0 => Cardinal::East,
        Axis::Longitude => Cardinal::West,
    }
}

/// An angle split into degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: u32,
    /// Always in `0..60`.
    pub minutes: u32,
    /// Rounded to one decimal place.
    pub seconds: f64,
    pub cardinal: Cardinal,
    /// Whether the decimal value this was built from was negative.
    pub negative: bool,
}

impl DmsCoordinate {
    /// Percent-encoded form for embedding into a URL, e.g. `48%C2%B07%272.3%22N`.
    pub fn url_encoded(&self) -> String {
        format!(
            "{}%C2%B0{}%27{:.1}%22{}",
            self.degrees, self.minutes, self.seconds, self.cardinal
        )
    }
}

/// Renders as `48°7'2.3"N`. A leading minus is kept for negative source
/// values even though the cardinal letter already tells the hemisphere.
impl fmt::Display for DmsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}°{}'{:.1}\"{}",
            if self.negative { "-" } else { "" },
            self.degrees,
            self.minutes,
            self.seconds,
            self.cardinal
        )
    }
}

/// Splits a signed decimal value into degrees, minutes and seconds.
pub fn decimal_to_dms(value: f64, axis: Axis) -> DmsCoordinate {
    let abs = value.abs();
    let degrees = abs.trunc();
    let minutes = ((abs - degrees) * 60.0).trunc();
    let seconds = ((abs - degrees) - minutes / 60.0) * 3600.0;
    DmsCoordinate {
        degrees: degrees as u32,
        minutes: minutes as u32,
        seconds: round_to(seconds, 1),
        cardinal: cardinal_of(value, axis),
        negative: value < 0.0,
    }
}

/// Recomposes a signed decimal value from its DMS parts.
pub fn dms_to_decimal(dms: &DmsCoordinate) -> f64 {
    let abs = f64::from(dms.degrees) + f64::from(dms.minutes) / 60.0 + dms.seconds / 3600.0;
    if dms.negative {
        -abs
    } else {
        abs
    }
}

/// Map deep link pointing at the given position.
pub fn map_link(lat: f64, long: f64) -> String {
    format!(
        "{}{}+{}",
        MAP_PLACE_URL,
        decimal_to_dms(lat, Axis::Latitude).url_encoded(),
        decimal_to_dms(long, Axis::Longitude).url_encoded()
    )
}

/// Decode a sexagesimal field (`DDMM.MMMM` or `DDDMM.MMMM`) into signed
/// decimal degrees.
/// `dir` will be converted to 1 or -1 to be multiplied with the degrees.
/// The value is rejected if it exceeds the range valid for `axis`.
pub fn decode_sexagesimal(
    field: &str,
    dir: Cardinal,
    axis: Axis,
) -> Result<f64, CoordinateParseError> {
    let deg_split = axis.degree_digits();
    // This check is needed to ensure we don't panic
    if deg_split >= field.len() {
        return Err(CoordinateParseError::InvalidInput(
            "the field is too short for a coordinate",
        ));
    }
    if !field.is_char_boundary(deg_split) {
        return Err(CoordinateParseError::InvalidInput(
            "the degrees are not ASCII digits",
        ));
    }

    let (deg, dec_min) = field.split_at(deg_split);
    if !deg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordinateParseError::InvalidInput(
            "the degrees are not ASCII digits",
        ));
    }
    let degrees = f64::from(u16::from_str(deg)?);
    let minutes = f64::from_str(dec_min)?;
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(CoordinateParseError::InvalidInput(
            "the minutes are not a non-negative number",
        ));
    }

    let dec_deg = degrees + minutes / 60.0;
    if dec_deg > axis.abs_max() {
        return Err(CoordinateParseError::InvalidCoord(dec_deg, axis.abs_max()));
    }
    Ok(dec_deg * dir.get_sign())
}

/// Rounds to `places` decimal places.
///
/// Goes through the decimal expansion of `value` rather than scaling it, so
/// a value stored just below a halfway point (`300.95` is `300.949999...`)
/// rounds down.
#[inline]
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
