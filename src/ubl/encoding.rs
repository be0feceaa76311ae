use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::core::ConvertError;

/// Number of leading bytes searched for the XML declaration.
const DECLARATION_WINDOW: usize = 1024;

static DECLARED_ENCODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\?xml[^>]*?encoding\s*=\s*['"]([^'"]+)['"]"#)
        .expect("static regex is valid")
});

/// Return the encoding label named in the XML declaration, if any.
pub fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(DECLARATION_WINDOW)];
    // Latin-1 maps every byte to a char, so the declaration survives whatever
    // encoding the body uses.
    let head: String = window.iter().map(|&b| b as char).collect();
    DECLARED_ENCODING
        .captures(&head)
        .map(|c| c[1].trim().to_string())
}

/// Decode a raw XML file into a `String`.
///
/// A byte order mark takes precedence, then the declared encoding. Unknown
/// labels fall back to UTF-8.
pub fn decode_document(bytes: &[u8]) -> Result<String, ConvertError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((enc, bom_len)) => (enc, &bytes[bom_len..]),
        None => {
            let enc = declared_encoding(bytes)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
                .unwrap_or(UTF_8);
            (enc, bytes)
        }
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(ConvertError::Encoding(format!(
            "content is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}
