//! Core document types, formatting helpers and errors.
//!
//! The types here are a typed view of the SUNAT UBL 2.1 documents: they hold
//! what the report tables need and nothing more.

mod cui;
mod error;
mod format;
mod types;

pub use cui::*;
pub use error::*;
pub use format::{format_amount, format_date, format_quantity};
pub(crate) use format::{opt_amount, opt_date, opt_quantity, opt_text};
pub use types::*;
