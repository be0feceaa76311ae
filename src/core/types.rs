use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document types this crate converts (SUNAT catalog 01).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Factura (01).
    Invoice,
    /// Boleta de Venta (03).
    SalesReceipt,
    /// Nota de Crédito (07).
    CreditNote,
    /// Nota de Débito (08).
    DebitNote,
    /// Guía de Remisión Remitente (09).
    Waybill,
}

impl DocumentType {
    /// Every supported type, in report order.
    pub const ALL: [DocumentType; 5] = [
        Self::Invoice,
        Self::SalesReceipt,
        Self::CreditNote,
        Self::DebitNote,
        Self::Waybill,
    ];

    /// SUNAT catalog 01 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "01",
            Self::SalesReceipt => "03",
            Self::CreditNote => "07",
            Self::DebitNote => "08",
            Self::Waybill => "09",
        }
    }

    /// Parse from a catalog 01 code. Leading zeros are optional.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().parse::<u8>().ok()? {
            1 => Some(Self::Invoice),
            3 => Some(Self::SalesReceipt),
            7 => Some(Self::CreditNote),
            8 => Some(Self::DebitNote),
            9 => Some(Self::Waybill),
            _ => None,
        }
    }

    /// Human-readable label used in logs and statistics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Factura",
            Self::SalesReceipt => "BoletaVenta",
            Self::CreditNote => "NotaCredito",
            Self::DebitNote => "NotaDebito",
            Self::Waybill => "GuiaRemision",
        }
    }

    /// Upper-case file name prefix that identifies the type.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Invoice => "FACTURA",
            Self::SalesReceipt => "BOLETAVENTA",
            Self::CreditNote => "NOTACREDITO",
            Self::DebitNote => "NOTADEBITO",
            Self::Waybill => "GUIAREMISION",
        }
    }

    /// Stem of the CSV report holding this type's records.
    pub fn report_stem(&self) -> &'static str {
        match self {
            Self::Invoice => "facturas",
            Self::SalesReceipt => "boletas",
            Self::CreditNote => "notas_credito",
            Self::DebitNote => "notas_debito",
            Self::Waybill => "guias_remision",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Root element of a UBL fiscal document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiscalRoot {
    Invoice,
    CreditNote,
    DebitNote,
}

impl FiscalRoot {
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::CreditNote => "CreditNote",
            Self::DebitNote => "DebitNote",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "Invoice" => Some(Self::Invoice),
            "CreditNote" => Some(Self::CreditNote),
            "DebitNote" => Some(Self::DebitNote),
            _ => None,
        }
    }
}

/// Issuer, customer or recipient of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Identifier (RUC, DNI, ...).
    pub id: Option<String>,
    /// SUNAT catalog 06 identity document type (6 = RUC, 1 = DNI).
    pub id_scheme: Option<String>,
    /// Registration name, or the commercial name when absent.
    pub name: Option<String>,
}

/// SUNAT catalog 05 tax scheme identifiers.
pub mod tax_scheme {
    pub const IGV: &str = "1000";
    pub const ISC: &str = "2000";
    pub const ICBPER: &str = "7152";
    pub const OTHER: &str = "9999";
}

/// One `cac:TaxSubtotal` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSubtotal {
    /// Catalog 05 scheme id (see [`tax_scheme`]).
    pub scheme_id: String,
    pub taxable_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
}

/// Invoice, credit note or debit note line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub id: Option<String>,
    pub item_code: Option<String>,
    pub quantity: Option<Decimal>,
    /// UN/ECE Rec 20 unit code (NIU, ZZ, KGM, ...).
    pub unit: Option<String>,
    pub description: Option<String>,
    /// Unit value without taxes (`cac:Price/cbc:PriceAmount`).
    pub unit_price: Option<Decimal>,
    /// Line value without taxes (`cbc:LineExtensionAmount`).
    pub line_amount: Option<Decimal>,
    pub igv: Option<Decimal>,
}

/// One `cac:PaymentTerms` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerm {
    /// Usually `FormaPago`.
    pub id: Option<String>,
    /// `Contado`, `Credito` or `CuotaNNN`.
    pub means: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Document a note modifies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub number: Option<String>,
    pub type_code: Option<String>,
}

/// Reason a note was issued (catalogs 09 and 10).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub response_code: Option<String>,
    pub description: Option<String>,
}

/// Typed view of an Invoice, CreditNote or DebitNote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalDocument {
    pub root: FiscalRoot,
    /// Series and correlative, e.g. `F001-123`.
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    /// `cbc:InvoiceTypeCode` (absent on notes).
    pub type_code: Option<String>,
    pub currency: Option<String>,
    pub supplier: Party,
    pub customer: Party,
    pub tax_subtotals: Vec<TaxSubtotal>,
    pub line_extension_amount: Option<Decimal>,
    pub payable_amount: Option<Decimal>,
    pub reference: Option<DocumentReference>,
    pub discrepancy: Option<Discrepancy>,
    pub lines: Vec<DocumentLine>,
    pub payment_terms: Vec<PaymentTerm>,
}

impl FiscalDocument {
    /// Tax amount for a catalog 05 scheme, summed over its subtotals.
    pub fn tax_amount(&self, scheme_id: &str) -> Option<Decimal> {
        self.tax_subtotals
            .iter()
            .filter(|s| s.scheme_id == scheme_id)
            .filter_map(|s| s.tax_amount)
            .reduce(|a, b| a + b)
    }

    /// Taxable base for a catalog 05 scheme.
    pub fn taxable_amount(&self, scheme_id: &str) -> Option<Decimal> {
        self.tax_subtotals
            .iter()
            .filter(|s| s.scheme_id == scheme_id)
            .filter_map(|s| s.taxable_amount)
            .reduce(|a, b| a + b)
    }
}

/// `cac:DespatchLine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DespatchLine {
    pub id: Option<String>,
    pub item_code: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub description: Option<String>,
}

/// Typed view of a DespatchAdvice (waybill).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DespatchAdvice {
    pub number: String,
    pub issue_date: NaiveDate,
    pub type_code: Option<String>,
    pub supplier: Party,
    pub recipient: Party,
    /// Catalog 20 reason for transfer.
    pub reason_code: Option<String>,
    pub reason_description: Option<String>,
    pub transfer_date: Option<NaiveDate>,
    pub gross_weight: Option<Decimal>,
    pub weight_unit: Option<String>,
    pub origin_address: Option<String>,
    pub delivery_address: Option<String>,
    pub lines: Vec<DespatchLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn document_type_codes_roundtrip() {
        for t in DocumentType::ALL {
            assert_eq!(DocumentType::from_code(t.code()), Some(t));
        }
        assert_eq!(DocumentType::from_code("1"), Some(DocumentType::Invoice));
        assert_eq!(DocumentType::from_code("20"), None);
        assert_eq!(DocumentType::from_code("x"), None);
    }

    #[test]
    fn tax_amount_sums_matching_schemes() {
        let doc = FiscalDocument {
            root: FiscalRoot::Invoice,
            number: "F001-1".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            due_date: None,
            type_code: Some("01".into()),
            currency: Some("PEN".into()),
            supplier: Party::default(),
            customer: Party::default(),
            tax_subtotals: vec![
                TaxSubtotal {
                    scheme_id: tax_scheme::IGV.into(),
                    taxable_amount: Some(dec!(100)),
                    tax_amount: Some(dec!(18)),
                },
                TaxSubtotal {
                    scheme_id: tax_scheme::ICBPER.into(),
                    taxable_amount: None,
                    tax_amount: Some(dec!(2)),
                },
            ],
            line_extension_amount: None,
            payable_amount: None,
            reference: None,
            discrepancy: None,
            lines: vec![],
            payment_terms: vec![],
        };
        assert_eq!(doc.tax_amount(tax_scheme::IGV), Some(dec!(18)));
        assert_eq!(doc.tax_amount(tax_scheme::ICBPER), Some(dec!(2)));
        assert_eq!(doc.tax_amount(tax_scheme::ISC), None);
        assert_eq!(doc.taxable_amount(tax_scheme::IGV), Some(dec!(100)));
    }
}
