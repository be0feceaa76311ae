#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic; errors are fine, panics are bugs.
    if let Ok(xml) = cpe2csv::ubl::decode_document(data) {
        let _ = cpe2csv::ubl::sniff(&xml);
    }
});
