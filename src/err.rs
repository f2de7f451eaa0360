use std::{io, num};

quick_error! {
    /// Errors of the whole pipeline. Everything in here aborts a run.
    #[derive(Debug)]
    pub enum Error {
        Io(err: io::Error) {
            from()
            description("I/O error")
            display("Encountered I/O error: {}", err)
            cause(err)
        }
    }
}

quick_error! {
    /// Reasons a single line was rejected as malformed.
    #[derive(Debug)]
    pub enum ParseError {
        Lexer(err: LexError) {
            from()
            description("Lexer error")
            display("Could not parse due to an error in the lexer: {}", err)
            cause(err)
        }
        Incomplete(found: usize, expected: usize) {
            description("Incomplete sentence")
            display("Sentence has {} fields, expected at least {}", found, expected)
        }
        FieldTooShort(field: &'static str, len: usize, expected: usize) {
            description("Field too short")
            display("Field {} has {} characters, expected {}", field, len, expected)
        }
        NotDigits(field: &'static str) {
            description("Non-numeric field")
            display("Field {} contains characters other than digits", field)
        }
        InvalidDir(dir: String) {
            description("Invalid cardinal direction")
            display("Encountered invalid cardinal direction \"{}\"", dir)
        }
        Coordinate(err: CoordinateParseError) {
            from()
            description("Coordinate parsing error")
            display("Could not parse field as coordinate: {}", err)
            cause(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum LexError {
        MissingStart {
            description("Missing start delimiter")
            display("Sentence does not start with '$'")
        }
        InvalidCharacter(c: u8) {
            from()
            description("Invalid character")
            display("Encountered invalid character \"{}\"", *c as char)
        }
        InvalidChecksum(expected: u8, actual: u8) {
            description("Invalid checksum")
            display("Expected checksum \"{:02X}\", found checksum \"{:02X}\"", expected, actual)
        }
        MalformedChecksum {
            description("Malformed checksum")
            display("Checksum is not two hexadecimal digits")
        }
        UnexpectedEof(token: &'static str) {
            from()
            description("Unexpected EOF")
            display("Encountered unexpected end of line in {}", token)
        }
        ArrayOverflow(capacity: usize) {
            description("Too many fields")
            display("Tried to push more than {} fields into the buffer", capacity)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CoordinateParseError {
        InvalidInput(msg: &'static str) {
            description("Invalid input")
            display("Invalid input: {}", msg)
        }
        Degrees(err: num::ParseIntError) {
            from()
            description("Degrees parsing error")
            display("{}", err)
            cause(err)
        }
        DecimalMin(err: num::ParseFloatError) {
            from()
            description("Decimal minutes parsing error")
            display("{}", err)
            cause(err)
        }
        InvalidCoord(val: f64, max: f64) {
            description("Invalid coordinate")
            display("Invalid coordinate: {} should be between {} and {}", val, max*-1.0, max)
        }
    }
}
