//! Wires the stages together: read, report rows, group.

use std::io::BufRead;

use crate::err::Error;
use crate::group::{group_by_year, YearGroup};
use crate::parser::RmcParser;
use crate::reader::{read_fixes, ReadStats};
use crate::report::{Report, ReportRow};

/// Everything derived from one log.
#[derive(Debug)]
pub struct Processed {
    pub report: Report,
    /// Ascending by year, one track file each.
    pub years: Vec<YearGroup>,
    pub stats: ReadStats,
}

/// Reads the whole log and derives the report and the yearly tracks.
pub fn process<R: BufRead>(input: R, parser: RmcParser) -> Result<Processed, Error> {
    let (fixes, stats) = read_fixes(input, parser)?;
    let rows = fixes.iter().map(ReportRow::from_fix).collect();
    let years = group_by_year(fixes);
    let report = Report::new(rows, &years);
    Ok(Processed {
        report,
        years,
        stats,
    })
}
