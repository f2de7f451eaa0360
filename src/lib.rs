//! Derives GPS tracks from logs of *NMEA 0183* RMC sentences.
//!
//! A log is read line by line, every `$GPRMC` sentence with a valid fix
//! becomes a [`Fix`](parser/struct.Fix.html). The fixes are grouped by year
//! and day, the travelled distance is computed per day and year, and each
//! year is written as a GPX track with one segment per day. A Markdown report
//! lists every fix together with the yearly distances.

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod err;
#[macro_use]
mod macros;
pub mod config;
pub mod coord;
pub mod distance;
pub mod gpx;
pub mod group;
mod lexer;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod report;

pub use config::Config;
pub use coord::{Axis, Cardinal, DmsCoordinate};
pub use err::{CoordinateParseError, Error, LexError, ParseError};
pub use group::{DateGroup, YearGroup};
pub use parser::{CenturyPolicy, Fix, FixDate, FixTime, RmcParser};
pub use pipeline::{process, Processed};
pub use reader::{FixReader, ReadStats};
