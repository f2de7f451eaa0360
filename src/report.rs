//! The Markdown report: yearly distances followed by a table with one row per
//! accepted fix.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::io;

use crate::coord::{decimal_to_dms, map_link, Axis};
use crate::distance::round_km;
use crate::err::Error;
use crate::group::{grand_total, YearGroup};
use crate::parser::Fix;

pub const HEADERS: [&str; 6] = ["Date", "Time", "Latitude", "Longitude", "Speed", "Link"];

/// One table row, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub time: String,
    pub latitude: String,
    pub longitude: String,
    /// `"41.5 km/h"`, or empty when the fix has no speed.
    pub speed: String,
    /// Markdown link to the position on a map.
    pub link: String,
}

impl ReportRow {
    pub fn from_fix(fix: &Fix) -> Self {
        ReportRow {
            date: fix.date.to_string(),
            time: fix.time.to_string(),
            latitude: decimal_to_dms(fix.latitude_deg, Axis::Latitude).to_string(),
            longitude: decimal_to_dms(fix.longitude_deg, Axis::Longitude).to_string(),
            speed: fix
                .speed_kmh
                .map(|s| format!("{:.1} km/h", s))
                .unwrap_or_default(),
            link: format!(
                "[View map]({})",
                map_link(fix.latitude_deg, fix.longitude_deg)
            ),
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.time.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.speed.as_str(),
            self.link.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSummary {
    pub year: u16,
    /// Rounded to two decimals.
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Ascending by year.
    pub summary: Vec<YearSummary>,
    /// Rounded to two decimals.
    pub total_km: f64,
    /// In arrival order.
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// `rows` are built from the accepted fixes in arrival order, `years`
    /// holds the same fixes grouped.
    pub fn new(rows: Vec<ReportRow>, years: &[YearGroup]) -> Self {
        Report {
            summary: years
                .iter()
                .map(|y| YearSummary {
                    year: y.year,
                    distance_km: round_km(y.distance_km),
                })
                .collect(),
            total_km: round_km(grand_total(years)),
            rows,
        }
    }
}

/// Writes `report` as a Markdown document.
pub fn render_markdown<W: io::Write>(
    mut out: W,
    report: &Report,
    title: &str,
    generated_at: DateTime<Utc>,
) -> Result<(), Error> {
    writeln!(out, "# {}", title)?;
    writeln!(out)?;
    writeln!(
        out,
        "**Generated:** {}",
        generated_at.format("%d/%m/%Y %H:%M:%S")
    )?;
    writeln!(out)?;

    writeln!(out, "## Distance per year")?;
    writeln!(out)?;
    for year in report.summary.iter() {
        writeln!(out, "- **{}**: {:.2} km", year.year, year.distance_km)?;
    }
    writeln!(out)?;
    writeln!(out, "**Total: {:.2} km**", report.total_km)?;
    writeln!(out)?;

    write_table(&mut out, &report.rows)?;

    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "*Extracted from NMEA RMC sentences*")?;
    Ok(())
}

/// GitHub flavoured table with columns padded to equal width.
fn write_table<W: io::Write>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    let escaped: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells().iter().map(|c| escape_cell(c)).collect())
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in escaped.iter() {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", table_line(HEADERS.iter().cloned(), &widths))?;
    writeln!(
        out,
        "|{}|",
        widths.iter().map(|w| "-".repeat(w + 2)).join("|")
    )?;
    for row in escaped.iter() {
        writeln!(out, "{}", table_line(row.iter().map(String::as_str), &widths))?;
    }
    Ok(())
}

fn table_line<'a, I>(cells: I, widths: &[usize]) -> String
where
    I: Iterator<Item = &'a str>,
{
    format!(
        "| {} |",
        cells
            .zip(widths.iter())
            .map(|(cell, width)| pad(cell, *width))
            .join(" | ")
    )
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{}{}", cell, " ".repeat(fill))
}

#[inline]
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
