//! Document type detection, by file name and by content.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{ConvertError, DocumentType};
use crate::ubl::sniff;

/// SUNAT file naming: `{RUC}-{TT}-{SERIE}-{CORRELATIVO}.xml`.
static SUNAT_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d{11}-(\d{2})-[A-Z0-9]{4}-\d{1,8}\.xml$").expect("static regex is valid")
});

/// Prefixes checked in this order.
const PREFIX_ORDER: [DocumentType; 5] = [
    DocumentType::Invoice,
    DocumentType::CreditNote,
    DocumentType::DebitNote,
    DocumentType::Waybill,
    DocumentType::SalesReceipt,
];

/// Detect the type from a file name, ignoring any directory part.
pub fn detect_from_file_name(name: &str) -> Option<DocumentType> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let upper = base.to_uppercase();

    if let Some(t) = PREFIX_ORDER
        .into_iter()
        .find(|t| upper.starts_with(t.file_prefix()))
    {
        return Some(t);
    }

    SUNAT_FILE_NAME
        .captures(base)
        .and_then(|c| DocumentType::from_code(&c[1]))
}

/// Detect the type from the root element and, for invoices, the
/// `InvoiceTypeCode`.
pub fn detect_from_root(root: &str, type_code: Option<&str>) -> Option<DocumentType> {
    match root {
        "Invoice" => match type_code.and_then(DocumentType::from_code) {
            Some(DocumentType::SalesReceipt) => Some(DocumentType::SalesReceipt),
            _ => Some(DocumentType::Invoice),
        },
        "CreditNote" => Some(DocumentType::CreditNote),
        "DebitNote" => Some(DocumentType::DebitNote),
        "DespatchAdvice" => Some(DocumentType::Waybill),
        _ => None,
    }
}

/// Detect by file name first and by content second.
///
/// A well-formed document of no supported type is
/// [`ConvertError::UnknownDocument`] carrying its root element name.
pub fn identify(name: &str, xml: &str) -> Result<DocumentType, ConvertError> {
    if let Some(t) = detect_from_file_name(name) {
        return Ok(t);
    }
    let info = sniff(xml)?;
    detect_from_root(&info.root, info.type_code.as_deref())
        .ok_or(ConvertError::UnknownDocument(info.root))
}
