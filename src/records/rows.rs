use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::CsvRow;
use crate::core::{format_date, opt_amount, opt_date, opt_quantity, opt_text};

/// One row of `facturas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRow {
    pub cui: Option<String>,
    pub type_code: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub issuer_ruc: String,
    pub issuer_name: Option<String>,
    pub customer_ruc: Option<String>,
    pub customer_name: Option<String>,
    /// Sale value before taxes (`LineExtensionAmount`).
    pub sale_value: Option<Decimal>,
    pub igv: Option<Decimal>,
    pub isc: Option<Decimal>,
    pub icbper: Option<Decimal>,
    pub other_taxes: Option<Decimal>,
    pub total: Option<Decimal>,
    pub source: String,
}

impl CsvRow for InvoiceRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "tipo_documento",
        "numero",
        "fecha_emision",
        "fecha_vencimiento",
        "moneda",
        "ruc_emisor",
        "nombre_emisor",
        "ruc_receptor",
        "nombre_receptor",
        "valor_venta",
        "total_igv",
        "total_isc",
        "total_icbper",
        "total_otros_tributos",
        "importe_total",
        "archivo",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.type_code.clone(),
            self.number.clone(),
            format_date(self.issue_date),
            opt_date(self.due_date),
            opt_text(self.currency.as_ref()),
            self.issuer_ruc.clone(),
            opt_text(self.issuer_name.as_ref()),
            opt_text(self.customer_ruc.as_ref()),
            opt_text(self.customer_name.as_ref()),
            opt_amount(self.sale_value),
            opt_amount(self.igv),
            opt_amount(self.isc),
            opt_amount(self.icbper),
            opt_amount(self.other_taxes),
            opt_amount(self.total),
            self.source.clone(),
        ]
    }
}

/// One row of `boletas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRow {
    pub cui: Option<String>,
    pub type_code: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub currency: Option<String>,
    pub issuer_ruc: String,
    pub issuer_name: Option<String>,
    /// Catalog 06 identity document type of the customer (1 = DNI, 0 = none).
    pub customer_id_type: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub igv: Option<Decimal>,
    pub total: Option<Decimal>,
    pub source: String,
}

impl CsvRow for ReceiptRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "tipo_documento",
        "numero",
        "fecha_emision",
        "moneda",
        "ruc_emisor",
        "nombre_emisor",
        "tipo_doc_cliente",
        "dni_cliente",
        "nombre_cliente",
        "total_igv",
        "total",
        "archivo",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.type_code.clone(),
            self.number.clone(),
            format_date(self.issue_date),
            opt_text(self.currency.as_ref()),
            self.issuer_ruc.clone(),
            opt_text(self.issuer_name.as_ref()),
            opt_text(self.customer_id_type.as_ref()),
            opt_text(self.customer_id.as_ref()),
            opt_text(self.customer_name.as_ref()),
            opt_amount(self.igv),
            opt_amount(self.total),
            self.source.clone(),
        ]
    }
}

/// One row of `notas_credito` or `notas_debito`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub cui: Option<String>,
    pub type_code: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub currency: Option<String>,
    pub issuer_ruc: String,
    pub issuer_name: Option<String>,
    pub customer_ruc: Option<String>,
    pub customer_name: Option<String>,
    /// Number of the document being modified.
    pub reference_number: Option<String>,
    pub reference_type: Option<String>,
    /// Catalog 09 (credit) or 10 (debit) reason code.
    pub reason_code: Option<String>,
    pub reason: Option<String>,
    pub igv: Option<Decimal>,
    pub total: Option<Decimal>,
    pub source: String,
}

impl CsvRow for NoteRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "tipo_documento",
        "numero",
        "fecha_emision",
        "moneda",
        "ruc_emisor",
        "nombre_emisor",
        "ruc_receptor",
        "nombre_receptor",
        "doc_referencia",
        "tipo_doc_referencia",
        "codigo_motivo",
        "motivo",
        "total_igv",
        "total",
        "archivo",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.type_code.clone(),
            self.number.clone(),
            format_date(self.issue_date),
            opt_text(self.currency.as_ref()),
            self.issuer_ruc.clone(),
            opt_text(self.issuer_name.as_ref()),
            opt_text(self.customer_ruc.as_ref()),
            opt_text(self.customer_name.as_ref()),
            opt_text(self.reference_number.as_ref()),
            opt_text(self.reference_type.as_ref()),
            opt_text(self.reason_code.as_ref()),
            opt_text(self.reason.as_ref()),
            opt_amount(self.igv),
            opt_amount(self.total),
            self.source.clone(),
        ]
    }
}

/// One row of `guias_remision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaybillRow {
    pub cui: Option<String>,
    pub type_code: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub transfer_date: Option<NaiveDate>,
    pub issuer_ruc: String,
    pub issuer_name: Option<String>,
    pub recipient_id: Option<String>,
    pub recipient_name: Option<String>,
    /// Catalog 20 reason for transfer.
    pub reason_code: Option<String>,
    pub reason_description: Option<String>,
    pub gross_weight: Option<Decimal>,
    pub weight_unit: Option<String>,
    pub origin_address: Option<String>,
    pub delivery_address: Option<String>,
    pub source: String,
}

impl CsvRow for WaybillRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "tipo_documento",
        "numero",
        "fecha_emision",
        "fecha_traslado",
        "ruc_emisor",
        "nombre_emisor",
        "ruc_destinatario",
        "nombre_destinatario",
        "motivo_traslado",
        "descripcion_motivo",
        "peso_bruto",
        "unidad_peso",
        "direccion_partida",
        "direccion_llegada",
        "archivo",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.type_code.clone(),
            self.number.clone(),
            format_date(self.issue_date),
            opt_date(self.transfer_date),
            self.issuer_ruc.clone(),
            opt_text(self.issuer_name.as_ref()),
            opt_text(self.recipient_id.as_ref()),
            opt_text(self.recipient_name.as_ref()),
            opt_text(self.reason_code.as_ref()),
            opt_text(self.reason_description.as_ref()),
            opt_quantity(self.gross_weight),
            opt_text(self.weight_unit.as_ref()),
            opt_text(self.origin_address.as_ref()),
            opt_text(self.delivery_address.as_ref()),
            self.source.clone(),
        ]
    }
}

/// One row of `lineas`: a document line of any type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRow {
    pub cui: Option<String>,
    pub type_code: String,
    pub number: String,
    pub line_id: Option<String>,
    pub item_code: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
    pub line_amount: Option<Decimal>,
    pub igv: Option<Decimal>,
}

impl CsvRow for LineRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "tipo_documento",
        "numero",
        "linea_id",
        "codigo_producto",
        "cantidad",
        "unidad",
        "descripcion",
        "precio_unitario",
        "subtotal",
        "linea_igv",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.type_code.clone(),
            self.number.clone(),
            opt_text(self.line_id.as_ref()),
            opt_text(self.item_code.as_ref()),
            opt_quantity(self.quantity),
            opt_text(self.unit.as_ref()),
            opt_text(self.description.as_ref()),
            opt_amount(self.unit_price),
            opt_amount(self.line_amount),
            opt_amount(self.igv),
        ]
    }
}

/// One row of `pagos`: a `cac:PaymentTerms` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub cui: Option<String>,
    pub number: String,
    pub term_id: Option<String>,
    pub means: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl CsvRow for PaymentRow {
    const HEADER: &'static [&'static str] = &[
        "cui",
        "numero",
        "forma_pago_id",
        "forma_pago",
        "monto_pago",
        "moneda_pago",
        "fecha_vencimiento",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            opt_text(self.cui.as_ref()),
            self.number.clone(),
            opt_text(self.term_id.as_ref()),
            opt_text(self.means.as_ref()),
            opt_amount(self.amount),
            opt_text(self.currency.as_ref()),
            opt_date(self.due_date),
        ]
    }
}
