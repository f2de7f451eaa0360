//! This module provides a parser for the *RMC* (recommended minimum
//! position, velocity and time) sentence of the *NMEA 0183* protocol.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::coord::{self, Axis, Cardinal};
use crate::err::ParseError;
use crate::lexer::{self, Sentence};

const TALKER_ID: &[u8; lexer::HEADER_LENGTH] = b"GP";
const SENTENCE_TYPE: &str = "RMC";
const VALID_FIX: &str = "A";
const KNOTS_TO_KMH: f64 = 1.852;

// Field positions, `0` being the address field.
const TIME: usize = 1;
const STATUS: usize = 2;
const LAT: usize = 3;
const LAT_DIR: usize = 4;
const LONG: usize = 5;
const LONG_DIR: usize = 6;
const SPEED: usize = 7;
const COURSE: usize = 8;
const DATE: usize = 9;
const MIN_FIELDS: usize = DATE + 1;

/// How the two digit year of the date field is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenturyPolicy {
    /// Every year is `20YY`. Logs recorded before 2000 are misdated.
    Fixed,
    /// Years `>= pivot` are `19YY`, the others `20YY`.
    Pivot(u8),
}

impl Default for CenturyPolicy {
    fn default() -> Self {
        CenturyPolicy::Fixed
    }
}

impl CenturyPolicy {
    #[inline]
    pub fn expand(self, yy: u8) -> u16 {
        match self {
            CenturyPolicy::Pivot(pivot) if yy >= pivot => 1900 + u16::from(yy),
            _ => 2000 + u16::from(yy),
        }
    }
}

/// Calendar date of a fix as transmitted, i.e. not necessarily a valid
/// calendar day. Ordered by year, month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl FixDate {
    /// `None` if the values do not name an existing day.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }
}

/// Formats as `DD/MM/YYYY`.
impl fmt::Display for FixDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// UTC time of day of a fix, second granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl FixTime {
    /// `None` if the values do not name a valid time of day.
    pub fn to_naive(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), u32::from(self.second))
    }
}

/// Formats as `HH:MM:SS`.
impl fmt::Display for FixTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A valid position report decoded from an RMC sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub date: FixDate,
    /// Universal Time Coordinated (UTC)
    pub time: FixTime,
    /// Latitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the northern hemisphere.
    /// A negative value indicates that the coordinate is in the southern hemisphere.
    pub latitude_deg: f64,
    /// Longitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the eastern hemisphere.
    /// A negative value indicates that the coordinate is in the western hemisphere.
    pub longitude_deg: f64,
    /// Speed over ground in km/h, rounded to one decimal.
    pub speed_kmh: Option<f64>,
    /// Course over ground in degrees (true).
    pub course_deg: Option<f64>,
    /// RMC carries no altitude, this is always `None`.
    pub altitude: Option<f64>,
    /// Date and time combined, `None` if they do not form a valid instant.
    pub timestamp: Option<NaiveDateTime>,
}

impl Fix {
    #[inline]
    pub fn year(&self) -> u16 {
        self.date.year
    }
}

/// The parser for `NMEA 0183` lines that accepts only `$GPRMC` sentences.
#[derive(Debug, Default, Clone, Copy)]
pub struct RmcParser {
    verify_checksum: bool,
    century: CenturyPolicy,
}

impl RmcParser {
    /// Create a new parser that does not verify checksums.
    pub fn new() -> Self {
        RmcParser::default()
    }

    /// Reject sentences whose transmitted checksum does not match.
    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    /// Choose how two digit years are expanded. Defaults to
    /// [`CenturyPolicy::Fixed`].
    pub fn century(mut self, policy: CenturyPolicy) -> Self {
        self.century = policy;
        self
    }

    /// Parse a single line.
    ///
    /// Returns `Ok(None)` for well-formed sentences that are not `$GPRMC` or
    /// whose status is not `A` (valid fix). Returns an error if the line is
    /// malformed.
    pub fn parse_line(&self, line: &str) -> Result<Option<Fix>, ParseError> {
        let sentence = lexer::lex(line)?;
        if &sentence.talker_id != TALKER_ID || sentence.kind != SENTENCE_TYPE {
            return Ok(None);
        }
        if self.verify_checksum {
            sentence.verify_checksum()?;
        }
        self.parse_rmc(&sentence)
    }

    /// Parse the fields of a lexed RMC sentence.
    fn parse_rmc(&self, sentence: &Sentence) -> Result<Option<Fix>, ParseError> {
        if sentence.fields.len() < MIN_FIELDS {
            return Err(ParseError::Incomplete(sentence.fields.len(), MIN_FIELDS));
        }
        let field = |idx: usize| sentence.field(idx).unwrap_or_default();

        if field(STATUS) != VALID_FIX {
            return Ok(None);
        }

        // Parse utc
        let [hour, minute, second] = split_digit_pairs(field(TIME), "time")?;
        let time = FixTime {
            hour,
            minute,
            second,
        };

        // Parse date
        let [day, month, year] = split_digit_pairs(field(DATE), "date")?;
        let date = FixDate {
            year: self.century.expand(year),
            month,
            day,
        };

        // Parse latitude
        let lat_dir = Self::parse_dir(field(LAT_DIR), Axis::Latitude)?;
        let latitude_deg = coord::decode_sexagesimal(field(LAT), lat_dir, Axis::Latitude)?;

        // Parse longitude
        let long_dir = Self::parse_dir(field(LONG_DIR), Axis::Longitude)?;
        let longitude_deg = coord::decode_sexagesimal(field(LONG), long_dir, Axis::Longitude)?;

        let speed_kmh = parse_optional_f64(field(SPEED))
            .filter(|knots| *knots >= 0.0)
            .map(|knots| coord::round_to(knots * KNOTS_TO_KMH, 1));
        let course_deg = parse_optional_f64(field(COURSE));

        let timestamp = match (date.to_naive(), time.to_naive()) {
            (Some(d), Some(t)) => Some(d.and_time(t)),
            _ => None,
        };

        Ok(Some(Fix {
            date,
            time,
            latitude_deg,
            longitude_deg,
            speed_kmh,
            course_deg,
            altitude: None,
            timestamp,
        }))
    }

    #[inline]
    fn parse_dir(field: &str, axis: Axis) -> Result<Cardinal, ParseError> {
        Cardinal::from_field(field, axis).ok_or_else(|| ParseError::InvalidDir(field.to_owned()))
    }
}

/// Splits the first six characters of `field` into three two-digit numbers.
/// Anything after the sixth character (e.g. fractional seconds) is ignored.
fn split_digit_pairs(field: &str, name: &'static str) -> Result<[u8; 3], ParseError> {
    const WIDTH: usize = 6;
    let digits = match field.get(..WIDTH) {
        Some(digits) => digits.as_bytes(),
        None => return Err(ParseError::FieldTooShort(name, field.len(), WIDTH)),
    };
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(ParseError::NotDigits(name));
    }
    let mut out = [0u8; 3];
    for (pair, chunk) in out.iter_mut().zip(digits.chunks(2)) {
        *pair = (chunk[0] - b'0') * 10 + (chunk[1] - b'0');
    }
    Ok(out)
}

/// An empty or unparseable optional field is absent, never an error.
#[inline]
fn parse_optional_f64(field: &str) -> Option<f64> {
    f64::from_str(field).ok().filter(|v| v.is_finite())
}
