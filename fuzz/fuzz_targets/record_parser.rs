#![no_main]

use libfuzzer_sys::fuzz_target;
use simtrace::record::{parse_column, Record};

fuzz_target!(|data: &[u8]| {
    // Log lines are read lossily, so feed the parser the same way
    let line = String::from_utf8_lossy(data);
    if let Ok(record) = Record::parse(&line) {
        assert!(record.time().is_finite());
    }
    let _ = parse_column(&line, 3, 6);
});
