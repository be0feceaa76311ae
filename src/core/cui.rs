/// Build the composite unique identifier (CUI) of a document.
///
/// The CUI is the issuer's RUC in lower-case hexadecimal, followed by the
/// catalog 01 type code padded to two digits and the document number with
/// its dashes removed, e.g. RUC `20123456789`, type `01`, number `F001-123`
/// gives `4af73951501F001123`.
///
/// Returns `None` when the RUC or the type code is not numeric.
pub fn generate_cui(ruc: &str, type_code: &str, number: &str) -> Option<String> {
    let ruc = ruc.trim().parse::<u64>().ok()?;
    let type_code = type_code.trim().parse::<u8>().ok()?;
    let number: String = number.trim().chars().filter(|c| *c != '-').collect();
    if number.is_empty() {
        return None;
    }
    Some(format!("{ruc:x}{type_code:02}{number}"))
}
