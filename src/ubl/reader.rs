use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::ConvertError;

/// Attributes of one element, keyed by local name.
#[derive(Debug, Clone, Default)]
pub struct Attrs(Vec<(String, String)>);

impl Attrs {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self, ConvertError> {
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr =
                attr.map_err(|err| ConvertError::Xml(format!("invalid attribute: {err}")))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| ConvertError::Xml(format!("invalid attribute value: {err}")))?;
            attrs.push((key, value.into_owned()));
        }
        Ok(Self(attrs))
    }
}

/// Receives the content of a UBL document as it is streamed.
///
/// `path` holds the namespace-stripped names of the open elements, starting
/// with the root, so `cac:AccountingSupplierParty/cbc:ID` under an Invoice is
/// `["Invoice", "AccountingSupplierParty", "ID"]`.
pub trait UblHandler {
    /// Non-empty text (or CDATA) inside the innermost element of `path`.
    fn text(&mut self, path: &[&str], attrs: &Attrs, text: &str);

    /// The innermost element of `path` has just closed.
    fn end(&mut self, _path: &[&str]) {}
}

/// Stream `xml` through `handler`. Returns the root element name.
pub fn walk<H: UblHandler>(xml: &str, handler: &mut H) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut attrs: Vec<Attrs> = Vec::new();
    let mut root: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                check_single_root(&root, &path, &name)?;
                root.get_or_insert_with(|| name.clone());
                attrs.push(Attrs::from_start(&e)?);
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                check_single_root(&root, &path, &name)?;
                Attrs::from_start(&e)?;
                root.get_or_insert_with(|| name.clone());
                path.push(name);
                handler.end(&as_strs(&path));
                path.pop();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ConvertError::Xml(format!("invalid text content: {err}")))?;
                emit_text(handler, &path, &attrs, &text)?;
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                emit_text(handler, &path, &attrs, text.trim())?;
            }
            Ok(Event::End(_)) => {
                handler.end(&as_strs(&path));
                path.pop();
                attrs.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Xml(format!(
                    "parse error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(ConvertError::Xml(format!(
            "unexpected end of document inside <{open}>"
        )));
    }
    root.ok_or_else(|| ConvertError::Xml("document has no root element".into()))
}

fn check_single_root(
    root: &Option<String>,
    path: &[String],
    name: &str,
) -> Result<(), ConvertError> {
    if path.is_empty() && root.is_some() {
        return Err(ConvertError::Xml(format!(
            "unexpected second root element <{name}>"
        )));
    }
    Ok(())
}

fn emit_text<H: UblHandler>(
    handler: &mut H,
    path: &[String],
    attrs: &[Attrs],
    text: &str,
) -> Result<(), ConvertError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    if path.is_empty() {
        return Err(ConvertError::Xml(format!(
            "text outside the root element: {:?}",
            text.chars().take(32).collect::<String>()
        )));
    }
    let leaf_attrs = attrs.last().cloned().unwrap_or_default();
    handler.text(&as_strs(path), &leaf_attrs, text);
    Ok(())
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn as_strs(path: &[String]) -> Vec<&str> {
    path.iter().map(String::as_str).collect()
}

/// Root element name and, for invoices, the catalog 01 type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootInfo {
    pub root: String,
    pub type_code: Option<String>,
}

#[derive(Default)]
struct RootSniffer {
    type_code: Option<String>,
}

impl UblHandler for RootSniffer {
    fn text(&mut self, path: &[&str], _attrs: &Attrs, text: &str) {
        if let [_, "InvoiceTypeCode"] = path {
            self.type_code.get_or_insert_with(|| text.to_string());
        }
    }
}

/// Identify a document by its content.
pub fn sniff(xml: &str) -> Result<RootInfo, ConvertError> {
    let mut sniffer = RootSniffer::default();
    let root = walk(xml, &mut sniffer)?;
    Ok(RootInfo {
        root,
        type_code: sniffer.type_code,
    })
}
