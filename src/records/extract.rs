//! Field mappings from the typed UBL documents to report rows.

use tracing::warn;

use super::rows::{InvoiceRow, LineRow, NoteRow, PaymentRow, ReceiptRow, WaybillRow};
use super::{DocumentRecord, Extraction};
use crate::core::{
    ConvertError, DespatchAdvice, DocumentType, FiscalDocument, FiscalRoot, generate_cui,
    tax_scheme,
};
use crate::ubl::{parse_despatch_advice, parse_fiscal_document};

/// Extract `xml` as a document of type `doc_type`.
///
/// `source` names the file the document came from and is copied into the
/// `archivo` column.
pub fn extract(
    doc_type: DocumentType,
    xml: &str,
    source: &str,
) -> Result<Extraction, ConvertError> {
    match doc_type {
        DocumentType::Invoice => extract_invoice(xml, source),
        DocumentType::SalesReceipt => extract_sales_receipt(xml, source),
        DocumentType::CreditNote => extract_credit_note(xml, source),
        DocumentType::DebitNote => extract_debit_note(xml, source),
        DocumentType::Waybill => extract_waybill(xml, source),
    }
}

/// Factura (01).
pub fn extract_invoice(xml: &str, source: &str) -> Result<Extraction, ConvertError> {
    let doc = parse_fiscal_document(xml, FiscalRoot::Invoice)?;
    check_invoice_type_code(&doc, DocumentType::Invoice, source);
    let header = Header::of(&doc, DocumentType::Invoice, source);

    let row = InvoiceRow {
        cui: header.cui.clone(),
        type_code: header.type_code.clone(),
        number: doc.number.clone(),
        issue_date: doc.issue_date,
        due_date: doc.due_date,
        currency: doc.currency.clone(),
        issuer_ruc: header.issuer_ruc.clone(),
        issuer_name: doc.supplier.name.clone(),
        customer_ruc: doc.customer.id.clone(),
        customer_name: doc.customer.name.clone(),
        // without a LineExtensionAmount, fall back to the IGV taxable base
        sale_value: doc
            .line_extension_amount
            .or_else(|| doc.taxable_amount(tax_scheme::IGV)),
        igv: doc.tax_amount(tax_scheme::IGV),
        isc: doc.tax_amount(tax_scheme::ISC),
        icbper: doc.tax_amount(tax_scheme::ICBPER),
        other_taxes: doc.tax_amount(tax_scheme::OTHER),
        total: doc.payable_amount,
        source: source.to_string(),
    };

    Ok(Extraction {
        record: DocumentRecord::Invoice(row),
        lines: fiscal_lines(&doc, &header),
        payments: fiscal_payments(&doc, &header),
    })
}

/// Boleta de Venta (03).
pub fn extract_sales_receipt(xml: &str, source: &str) -> Result<Extraction, ConvertError> {
    let doc = parse_fiscal_document(xml, FiscalRoot::Invoice)?;
    check_invoice_type_code(&doc, DocumentType::SalesReceipt, source);
    let header = Header::of(&doc, DocumentType::SalesReceipt, source);

    let row = ReceiptRow {
        cui: header.cui.clone(),
        type_code: header.type_code.clone(),
        number: doc.number.clone(),
        issue_date: doc.issue_date,
        currency: doc.currency.clone(),
        issuer_ruc: header.issuer_ruc.clone(),
        issuer_name: doc.supplier.name.clone(),
        customer_id_type: doc.customer.id_scheme.clone(),
        customer_id: doc.customer.id.clone(),
        customer_name: doc.customer.name.clone(),
        igv: doc.tax_amount(tax_scheme::IGV),
        total: doc.payable_amount,
        source: source.to_string(),
    };

    Ok(Extraction {
        record: DocumentRecord::SalesReceipt(row),
        lines: fiscal_lines(&doc, &header),
        payments: fiscal_payments(&doc, &header),
    })
}

/// Nota de Crédito (07).
pub fn extract_credit_note(xml: &str, source: &str) -> Result<Extraction, ConvertError> {
    let doc = parse_fiscal_document(xml, FiscalRoot::CreditNote)?;
    let (row, header) = note_row(&doc, DocumentType::CreditNote, source);
    Ok(Extraction {
        record: DocumentRecord::CreditNote(row),
        lines: fiscal_lines(&doc, &header),
        payments: fiscal_payments(&doc, &header),
    })
}

/// Nota de Débito (08).
pub fn extract_debit_note(xml: &str, source: &str) -> Result<Extraction, ConvertError> {
    let doc = parse_fiscal_document(xml, FiscalRoot::DebitNote)?;
    let (row, header) = note_row(&doc, DocumentType::DebitNote, source);
    Ok(Extraction {
        record: DocumentRecord::DebitNote(row),
        lines: fiscal_lines(&doc, &header),
        payments: fiscal_payments(&doc, &header),
    })
}

/// Guía de Remisión Remitente (09).
pub fn extract_waybill(xml: &str, source: &str) -> Result<Extraction, ConvertError> {
    let guia = parse_despatch_advice(xml)?;
    let header = Header::of_despatch(&guia, source);

    let lines = guia
        .lines
        .iter()
        .map(|line| LineRow {
            cui: header.cui.clone(),
            type_code: header.type_code.clone(),
            number: guia.number.clone(),
            line_id: line.id.clone(),
            item_code: line.item_code.clone(),
            quantity: line.quantity,
            unit: line.unit.clone(),
            description: line.description.clone(),
            unit_price: None,
            line_amount: None,
            igv: None,
        })
        .collect();

    let row = WaybillRow {
        cui: header.cui,
        type_code: header.type_code,
        number: guia.number,
        issue_date: guia.issue_date,
        transfer_date: guia.transfer_date,
        issuer_ruc: header.issuer_ruc,
        issuer_name: guia.supplier.name,
        recipient_id: guia.recipient.id,
        recipient_name: guia.recipient.name,
        reason_code: guia.reason_code,
        reason_description: guia.reason_description,
        gross_weight: guia.gross_weight,
        weight_unit: guia.weight_unit,
        origin_address: guia.origin_address,
        delivery_address: guia.delivery_address,
        source: source.to_string(),
    };

    Ok(Extraction {
        record: DocumentRecord::Waybill(row),
        lines,
        payments: Vec::new(),
    })
}

/// Columns shared by a document row and its detail rows.
struct Header {
    cui: Option<String>,
    type_code: String,
    issuer_ruc: String,
}

impl Header {
    fn of(doc: &FiscalDocument, doc_type: DocumentType, source: &str) -> Self {
        Self::new(doc.supplier.id.as_deref(), doc_type, &doc.number, source)
    }

    fn of_despatch(guia: &DespatchAdvice, source: &str) -> Self {
        Self::new(
            guia.supplier.id.as_deref(),
            DocumentType::Waybill,
            &guia.number,
            source,
        )
    }

    fn new(ruc: Option<&str>, doc_type: DocumentType, number: &str, source: &str) -> Self {
        let issuer_ruc = ruc.unwrap_or_default().trim().to_string();
        let cui = generate_cui(&issuer_ruc, doc_type.code(), number);
        if cui.is_none() {
            warn!(
                source,
                ruc = %issuer_ruc,
                number,
                "cannot compute CUI: issuer RUC is not numeric"
            );
        }
        Self {
            cui,
            type_code: doc_type.code().to_string(),
            issuer_ruc,
        }
    }
}

fn check_invoice_type_code(doc: &FiscalDocument, expected: DocumentType, source: &str) {
    let Some(code) = doc.type_code.as_deref() else {
        return;
    };
    if DocumentType::from_code(code) != Some(expected) {
        warn!(
            source,
            type_code = code,
            expected = expected.code(),
            "InvoiceTypeCode disagrees with detected document type"
        );
    }
}

fn note_row(doc: &FiscalDocument, doc_type: DocumentType, source: &str) -> (NoteRow, Header) {
    let header = Header::of(doc, doc_type, source);
    let reference = doc.reference.clone().unwrap_or_default();
    let discrepancy = doc.discrepancy.clone().unwrap_or_default();

    let row = NoteRow {
        cui: header.cui.clone(),
        type_code: header.type_code.clone(),
        number: doc.number.clone(),
        issue_date: doc.issue_date,
        currency: doc.currency.clone(),
        issuer_ruc: header.issuer_ruc.clone(),
        issuer_name: doc.supplier.name.clone(),
        customer_ruc: doc.customer.id.clone(),
        customer_name: doc.customer.name.clone(),
        reference_number: reference.number,
        reference_type: reference.type_code,
        reason_code: discrepancy.response_code,
        reason: discrepancy.description,
        igv: doc.tax_amount(tax_scheme::IGV),
        total: doc.payable_amount,
        source: source.to_string(),
    };
    (row, header)
}

fn fiscal_lines(doc: &FiscalDocument, header: &Header) -> Vec<LineRow> {
    doc.lines
        .iter()
        .map(|line| LineRow {
            cui: header.cui.clone(),
            type_code: header.type_code.clone(),
            number: doc.number.clone(),
            line_id: line.id.clone(),
            item_code: line.item_code.clone(),
            quantity: line.quantity,
            unit: line.unit.clone(),
            description: line.description.clone(),
            unit_price: line.unit_price,
            line_amount: line.line_amount,
            igv: line.igv,
        })
        .collect()
}

fn fiscal_payments(doc: &FiscalDocument, header: &Header) -> Vec<PaymentRow> {
    doc.payment_terms
        .iter()
        .map(|term| PaymentRow {
            cui: header.cui.clone(),
            number: doc.number.clone(),
            term_id: term.id.clone(),
            means: term.means.clone(),
            amount: term.amount,
            currency: term.currency.clone(),
            due_date: term.due_date,
        })
        .collect()
}
