//! Reads fixes from a line oriented NMEA log.

use std::io::{self, BufRead};

use crate::err::Error;
use crate::parser::{Fix, RmcParser};

/// Only lines starting with this marker are handed to the parser.
pub const RMC_MARKER: &str = "$GPRMC";

/// What happened to the lines read so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    /// Lines that yielded a fix.
    pub accepted: usize,
    /// RMC sentences without a valid fix.
    pub filtered: usize,
    /// RMC sentences that could not be parsed.
    pub malformed: usize,
}

impl ReadStats {
    /// Lines that are not RMC sentences at all.
    pub fn ignored(&self) -> usize {
        self.lines - self.accepted - self.filtered - self.malformed
    }
}

/// An iterator over the valid fixes of a log.
///
/// Lines that do not carry a valid fix are skipped. Only I/O errors are
/// returned, after which the iterator should not be polled again.
pub struct FixReader<R> {
    input: R,
    parser: RmcParser,
    buf: Vec<u8>,
    stats: ReadStats,
}

impl<R: BufRead> FixReader<R> {
    pub fn new(input: R, parser: RmcParser) -> Self {
        FixReader {
            input,
            parser,
            buf: Vec::new(),
            stats: ReadStats::default(),
        }
    }

    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    /// Reads the next raw line. Invalid UTF-8 is replaced, such lines are
    /// later rejected by the lexer.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.stats.lines += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for FixReader<R> {
    type Item = Result<Fix, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = try_some!(self.next_line())?;
            if !line.starts_with(RMC_MARKER) {
                continue;
            }
            match self.parser.parse_line(&line) {
                Ok(Some(fix)) => {
                    self.stats.accepted += 1;
                    return Some(Ok(fix));
                }
                Ok(None) => {
                    self.stats.filtered += 1;
                    debug!("line {}: no valid fix", self.stats.lines);
                }
                Err(e) => {
                    self.stats.malformed += 1;
                    warn!("line {}: skipping malformed sentence: {}", self.stats.lines, e);
                }
            }
        }
    }
}

/// Collects all valid fixes of `input` in arrival order.
pub fn read_fixes<R: BufRead>(input: R, parser: RmcParser) -> Result<(Vec<Fix>, ReadStats), Error> {
    let mut reader = FixReader::new(input, parser);
    let fixes = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    let stats = reader.stats();
    info!(
        "read {} lines: {} fixes, {} without fix, {} malformed, {} ignored",
        stats.lines,
        stats.accepted,
        stats.filtered,
        stats.malformed,
        stats.ignored()
    );
    Ok((fixes, stats))
}
