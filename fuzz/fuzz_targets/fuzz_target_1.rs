#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate rmc_track;

use std::io::Cursor;
use rmc_track::{FixReader, RmcParser};

fuzz_target!(|data: &[u8]| {
    let parser = RmcParser::new().verify_checksum(data.first() == Some(&b'$'));
    let reader = FixReader::new(Cursor::new(data), parser);

    for fix in reader {
        if let Ok(fix) = fix {
            assert!(fix.latitude_deg.abs() <= 90.0);
            assert!(fix.longitude_deg.abs() <= 180.0);
        }
    }
});
