//! Splits a raw NMEA 0183 line into its comma separated fields.
//!
//! The lexer knows nothing about the meaning of the fields. It only checks the
//! framing of a sentence: the leading `$`, the talker id, printable ASCII
//! content and the optional `*HH` checksum suffix.

use arrayvec::ArrayVec;

use crate::err::LexError;

pub const HEADER_LENGTH: usize = 2;
pub const FIELD_CAPACITY: usize = 24;

const CHECKSUM_LENGTH: usize = 2;

/// A lexed sentence borrowing from the input line.
///
/// `fields[0]` is the address field (talker id and sentence type, without the
/// `$`), so the indices of the payload fields match the positions they are
/// documented at in the NMEA 0183 standard.
#[derive(Debug)]
pub struct Sentence<'a> {
    pub talker_id: [u8; HEADER_LENGTH],
    pub kind: &'a str,
    pub fields: ArrayVec<[&'a str; FIELD_CAPACITY]>,
    /// The checksum transmitted after `*`, if any.
    pub checksum: Option<u8>,
    computed: u8,
}

impl<'a> Sentence<'a> {
    /// Checksum computed over every byte between `$` and `*`.
    #[inline]
    pub fn computed_checksum(&self) -> u8 {
        self.computed
    }

    /// Compare the transmitted checksum with the computed one.
    /// A sentence without checksum always passes.
    pub fn verify_checksum(&self) -> Result<(), LexError> {
        match self.checksum {
            Some(actual) if actual != self.computed_checksum() => {
                Err(LexError::InvalidChecksum(self.computed_checksum(), actual))
            }
            _ => Ok(()),
        }
    }

    /// Returns the field at `idx`, or `None` if the sentence is shorter.
    #[inline]
    pub fn field(&self, idx: usize) -> Option<&'a str> {
        self.fields.get(idx).cloned()
    }
}

/// Lex a single line. Trailing whitespace (including `\r\n`) is ignored.
pub fn lex(line: &str) -> Result<Sentence<'_>, LexError> {
    let line = line.trim_end();
    let body = match line.strip_prefix('$') {
        Some(body) => body,
        None => return Err(LexError::MissingStart),
    };

    if let Some(&c) = body
        .as_bytes()
        .iter()
        .find(|c| !c.is_ascii() || c.is_ascii_control())
    {
        return Err(c.into());
    }

    let (body, checksum) = match body.find('*') {
        Some(pos) => (&body[..pos], Some(parse_checksum(&body[pos + 1..])?)),
        None => (body, None),
    };

    let mut fields = ArrayVec::<[&str; FIELD_CAPACITY]>::new();
    for field in body.split(',') {
        if fields.try_push(field).is_err() {
            return Err(LexError::ArrayOverflow(fields.capacity()));
        }
    }

    // split always yields at least one item
    let address = fields[0];
    if address.len() <= HEADER_LENGTH {
        return Err("Header".into());
    }
    let mut talker_id = [0u8; HEADER_LENGTH];
    talker_id.copy_from_slice(&address.as_bytes()[..HEADER_LENGTH]);

    Ok(Sentence {
        talker_id,
        kind: &address[HEADER_LENGTH..],
        fields,
        checksum,
        computed: checksum_of(body),
    })
}

/// XOR of all bytes of `body`.
#[inline]
pub fn checksum_of(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

fn parse_checksum(hex: &str) -> Result<u8, LexError> {
    if hex.len() != CHECKSUM_LENGTH {
        return Err(LexError::MalformedChecksum);
    }
    u8::from_str_radix(hex, 16).map_err(|_| LexError::MalformedChecksum)
}
