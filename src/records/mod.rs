//! Report rows and the per-document-type extraction functions.
//!
//! Every table of a run is a list of rows implementing [`CsvRow`]. The five
//! `extract_*` functions turn one decoded XML document into its document row
//! plus the line and payment rows that point back to it through the CUI.

mod extract;
mod rows;
mod stats;

pub use extract::{
    extract, extract_credit_note, extract_debit_note, extract_invoice, extract_sales_receipt,
    extract_waybill,
};
pub use rows::{InvoiceRow, LineRow, NoteRow, PaymentRow, ReceiptRow, WaybillRow};
pub use stats::RunStats;

use crate::core::DocumentType;

/// A row of one of the report tables.
pub trait CsvRow {
    /// Column names, in output order.
    const HEADER: &'static [&'static str];

    /// Field values formatted for output, one per `HEADER` column.
    fn fields(&self) -> Vec<String>;
}

/// The document-level row of an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRecord {
    Invoice(InvoiceRow),
    SalesReceipt(ReceiptRow),
    CreditNote(NoteRow),
    DebitNote(NoteRow),
    Waybill(WaybillRow),
}

impl DocumentRecord {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::Invoice(_) => DocumentType::Invoice,
            Self::SalesReceipt(_) => DocumentType::SalesReceipt,
            Self::CreditNote(_) => DocumentType::CreditNote,
            Self::DebitNote(_) => DocumentType::DebitNote,
            Self::Waybill(_) => DocumentType::Waybill,
        }
    }

    /// CUI of the document, when it could be computed.
    pub fn cui(&self) -> Option<&str> {
        match self {
            Self::Invoice(r) => r.cui.as_deref(),
            Self::SalesReceipt(r) => r.cui.as_deref(),
            Self::CreditNote(r) | Self::DebitNote(r) => r.cui.as_deref(),
            Self::Waybill(r) => r.cui.as_deref(),
        }
    }

    /// Series and correlative of the document.
    pub fn number(&self) -> &str {
        match self {
            Self::Invoice(r) => &r.number,
            Self::SalesReceipt(r) => &r.number,
            Self::CreditNote(r) | Self::DebitNote(r) => &r.number,
            Self::Waybill(r) => &r.number,
        }
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: DocumentRecord,
    pub lines: Vec<LineRow>,
    pub payments: Vec<PaymentRow>,
}

/// Rows collected over a run, one table per report file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub invoices: Vec<InvoiceRow>,
    pub sales_receipts: Vec<ReceiptRow>,
    pub credit_notes: Vec<NoteRow>,
    pub debit_notes: Vec<NoteRow>,
    pub waybills: Vec<WaybillRow>,
    pub lines: Vec<LineRow>,
    pub payments: Vec<PaymentRow>,
}

impl Tables {
    /// Append an extraction to the matching tables.
    pub fn push(&mut self, extraction: Extraction) {
        match extraction.record {
            DocumentRecord::Invoice(r) => self.invoices.push(r),
            DocumentRecord::SalesReceipt(r) => self.sales_receipts.push(r),
            DocumentRecord::CreditNote(r) => self.credit_notes.push(r),
            DocumentRecord::DebitNote(r) => self.debit_notes.push(r),
            DocumentRecord::Waybill(r) => self.waybills.push(r),
        }
        self.lines.extend(extraction.lines);
        self.payments.extend(extraction.payments);
    }

    /// Number of document rows across the five document tables.
    pub fn document_count(&self) -> usize {
        self.invoices.len()
            + self.sales_receipts.len()
            + self.credit_notes.len()
            + self.debit_notes.len()
            + self.waybills.len()
    }
}
