#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (name, xml) = s.split_once('\n').unwrap_or((s, s));
        if let Ok(doc_type) = cpe2csv::batch::identify(name, xml) {
            let _ = cpe2csv::records::extract(doc_type, xml, name);
        }
    }
});
