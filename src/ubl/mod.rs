//! Reading SUNAT UBL 2.1 documents.
//!
//! The parsers stream the XML with `quick-xml` and match on the
//! namespace-stripped element path, so prefixes (`cbc:`, `cac:`, or none at
//! all in older documents) do not matter. Extension blocks
//! (`ext:UBLExtensions`) and the XML signature sit on paths no parser
//! matches and are ignored.
//!
//! # Supported roots
//!
//! - `Invoice` (Factura 01 and Boleta 03), `CreditNote`, `DebitNote`:
//!   [`parse_fiscal_document`]
//! - `DespatchAdvice` (Guía de Remisión 09): [`parse_despatch_advice`]
//!
//! # Example
//!
//! ```
//! use cpe2csv::core::FiscalRoot;
//! use cpe2csv::ubl;
//!
//! let xml = r#"<Invoice>
//!   <ID>F001-1</ID>
//!   <IssueDate>2024-03-15</IssueDate>
//!   <AccountingSupplierParty><Party>
//!     <PartyIdentification><ID schemeID="6">20123456789</ID></PartyIdentification>
//!   </Party></AccountingSupplierParty>
//! </Invoice>"#;
//!
//! let info = ubl::sniff(xml).unwrap();
//! assert_eq!(info.root, "Invoice");
//!
//! let doc = ubl::parse_fiscal_document(xml, FiscalRoot::Invoice).unwrap();
//! assert_eq!(doc.number, "F001-1");
//! ```

mod despatch;
mod encoding;
mod fiscal;
mod party;
mod reader;
mod values;

pub use despatch::parse_despatch_advice;
pub use encoding::{declared_encoding, decode_document};
pub use fiscal::parse_fiscal_document;
pub use reader::{Attrs, RootInfo, UblHandler, sniff, walk};

