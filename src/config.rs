use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::gpx::TrackMetadata;
use crate::parser::{CenturyPolicy, RmcParser};

pub const DEFAULT_REPORT: &str = "gps_output.md";
pub const DEFAULT_GPX_PREFIX: &str = "gps_output";
pub const DEFAULT_CREATOR: &str = "rmc-track";
pub const DEFAULT_TITLE: &str = "GPS track";
pub const DEFAULT_REPORT_TITLE: &str = "GPS data";

/// Settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// NMEA log to read
    pub input: PathBuf,
    /// Markdown report to write
    pub report: PathBuf,
    /// Track files are written to `{gpx_prefix}_{year}.gpx`
    pub gpx_prefix: String,
    pub author: String,
    pub description: String,
    /// `creator` attribute of the track files
    pub creator: String,
    /// Tracks are named `{title} {year}`
    pub title: String,
    pub report_title: String,
    /// Reject sentences with a wrong checksum
    pub verify_checksum: bool,
    pub century: CenturyPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::new(),
            report: PathBuf::from(DEFAULT_REPORT),
            gpx_prefix: DEFAULT_GPX_PREFIX.to_owned(),
            author: String::new(),
            description: String::new(),
            creator: DEFAULT_CREATOR.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            report_title: DEFAULT_REPORT_TITLE.to_owned(),
            verify_checksum: false,
            century: CenturyPolicy::default(),
        }
    }
}

impl Config {
    pub fn parser(&self) -> RmcParser {
        RmcParser::new()
            .verify_checksum(self.verify_checksum)
            .century(self.century)
    }

    pub fn track_metadata(&self, generated_at: DateTime<Utc>) -> TrackMetadata<'_> {
        TrackMetadata {
            creator: &self.creator,
            author: &self.author,
            description: &self.description,
            title_prefix: &self.title,
            generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.report, PathBuf::from("gps_output.md"));
        assert_eq!(cfg.gpx_prefix, "gps_output");
        assert!(!cfg.verify_checksum);
        assert_eq!(cfg.century, CenturyPolicy::Fixed);
    }

    #[test]
    fn parser_follows_settings() {
        let cfg = Config {
            verify_checksum: true,
            ..Config::default()
        };
        let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*00";
        assert!(cfg.parser().parse_line(line).is_err());
        assert!(Config::default().parser().parse_line(line).unwrap().is_some());
    }

    #[test]
    fn metadata_borrows_settings() {
        let cfg = Config {
            author: "someone".to_owned(),
            ..Config::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let meta = cfg.track_metadata(at);
        assert_eq!(meta.author, "someone");
        assert_eq!(meta.creator, DEFAULT_CREATOR);
        assert_eq!(meta.title_prefix, DEFAULT_TITLE);
        assert_eq!(meta.generated_at, at);
    }
}
