#![no_main]

use cpe2csv::core::FiscalRoot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for root in [FiscalRoot::Invoice, FiscalRoot::CreditNote, FiscalRoot::DebitNote] {
            let _ = cpe2csv::ubl::parse_fiscal_document(s, root);
        }
    }
});
