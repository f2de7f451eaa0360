//! Partitioning of fixes into years and days.

use std::collections::BTreeMap;

use crate::distance::total_distance;
use crate::parser::{Fix, FixDate};

/// The fixes recorded on one day, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: FixDate,
    pub fixes: Vec<Fix>,
    /// Distance travelled on this day in km, not rounded.
    pub distance_km: f64,
}

impl DateGroup {
    fn new(date: FixDate, fixes: Vec<Fix>) -> Self {
        let distance_km = total_distance(&fixes);
        DateGroup {
            date,
            fixes,
            distance_km,
        }
    }
}

/// The days of one year in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup {
    pub year: u16,
    pub dates: Vec<DateGroup>,
    /// Sum of the (unrounded) distances of all days, in km.
    pub distance_km: f64,
}

impl YearGroup {
    pub fn fix_count(&self) -> usize {
        self.dates.iter().map(|d| d.fixes.len()).sum()
    }
}

/// Groups fixes by date. Groups are sorted by date, fixes keep the order
/// in which they were passed in.
pub fn group_by_date<I>(fixes: I) -> Vec<DateGroup>
where
    I: IntoIterator<Item = Fix>,
{
    let mut by_date: BTreeMap<FixDate, Vec<Fix>> = BTreeMap::new();
    for fix in fixes {
        by_date.entry(fix.date).or_insert_with(Vec::new).push(fix);
    }
    by_date
        .into_iter()
        .map(|(date, fixes)| DateGroup::new(date, fixes))
        .collect()
}

/// Groups fixes by year, and each year by date.
pub fn group_by_year<I>(fixes: I) -> Vec<YearGroup>
where
    I: IntoIterator<Item = Fix>,
{
    let mut by_year: BTreeMap<u16, Vec<Fix>> = BTreeMap::new();
    for fix in fixes {
        by_year.entry(fix.year()).or_insert_with(Vec::new).push(fix);
    }
    by_year
        .into_iter()
        .map(|(year, fixes)| {
            let dates = group_by_date(fixes);
            let distance_km = dates.iter().fold(0.0, |acc, d| acc + d.distance_km);
            YearGroup {
                year,
                dates,
                distance_km,
            }
        })
        .collect()
}

/// Sum of the (unrounded) yearly distances.
pub fn grand_total(years: &[YearGroup]) -> f64 {
    years.iter().fold(0.0, |acc, y| acc + y.distance_km)
}
