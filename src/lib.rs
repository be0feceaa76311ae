//! # cpe2csv
//!
//! Batch converter from Peruvian SUNAT electronic tax documents
//! ("comprobantes de pago electrónicos", UBL 2.1) to CSV reports.
//!
//! Supported documents: Factura (01), Boleta de Venta (03), Nota de Crédito
//! (07), Nota de Débito (08) and Guía de Remisión Remitente (09).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpe2csv::records::{CsvRow, DocumentRecord, InvoiceRow, extract_invoice};
//!
//! let xml = r#"<Invoice>
//!   <ID>F001-123</ID>
//!   <IssueDate>2024-03-15</IssueDate>
//!   <InvoiceTypeCode>01</InvoiceTypeCode>
//!   <AccountingSupplierParty><Party>
//!     <PartyIdentification><ID schemeID="6">20123456789</ID></PartyIdentification>
//!   </Party></AccountingSupplierParty>
//!   <LegalMonetaryTotal><PayableAmount currencyID="PEN">118</PayableAmount></LegalMonetaryTotal>
//! </Invoice>"#;
//!
//! let extraction = extract_invoice(xml, "factura.xml").unwrap();
//! let DocumentRecord::Invoice(row) = extraction.record else { unreachable!() };
//! assert_eq!(row.cui.as_deref(), Some("4af73951501F001123"));
//! assert_eq!(row.fields()[InvoiceRow::HEADER.len() - 2], "118.00");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` (default) | `cpe2csv` binary: argument parsing and log setup |
//! | `zip` (default) | Read XML documents packed in `*.zip` archives |

pub mod batch;
pub mod config;
pub mod core;
pub mod records;
pub mod ubl;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub use crate::batch::{Converter, RunReport};
pub use crate::config::{ConvertConfig, ConvertConfigBuilder};
pub use crate::core::*;
