//! Invoice, CreditNote and DebitNote parsing.

use super::party::ParsedParty;
use super::reader::{Attrs, UblHandler, walk};
use super::values::{append, parse_date, parse_decimal, required, set_attr_once, set_once};
use crate::core::{
    ConvertError, Discrepancy, DocumentLine, DocumentReference, FiscalDocument, FiscalRoot,
    PaymentTerm, TaxSubtotal, tax_scheme,
};

/// Parse a SUNAT UBL 2.1 fiscal document whose root must be `expected`.
pub fn parse_fiscal_document(
    xml: &str,
    expected: FiscalRoot,
) -> Result<FiscalDocument, ConvertError> {
    let mut parsed = ParsedFiscal::default();
    let root = walk(xml, &mut parsed)?;
    if root != expected.element_name() {
        return Err(ConvertError::RootMismatch {
            expected: expected.element_name(),
            found: root,
        });
    }
    parsed.into_document(expected)
}

#[derive(Debug, Default)]
struct ParsedFiscal {
    number: Option<String>,
    issue_date: Option<String>,
    due_date: Option<String>,
    type_code: Option<String>,
    currency: Option<String>,
    payable_currency: Option<String>,

    supplier: ParsedParty,
    customer: ParsedParty,

    tax_subtotals: Vec<ParsedSubtotal>,
    current_subtotal: Option<ParsedSubtotal>,

    line_extension_amount: Option<String>,
    payable_amount: Option<String>,

    // Notes only
    reference_number: Option<String>,
    reference_type: Option<String>,
    response_code: Option<String>,
    response_description: Option<String>,

    lines: Vec<ParsedLine>,
    current_line: Option<ParsedLine>,

    payment_terms: Vec<ParsedPaymentTerm>,
    current_term: Option<ParsedPaymentTerm>,
}

#[derive(Debug, Default)]
struct ParsedSubtotal {
    scheme_id: Option<String>,
    taxable_amount: Option<String>,
    tax_amount: Option<String>,
}

#[derive(Debug, Default)]
struct ParsedLine {
    id: Option<String>,
    item_code: Option<String>,
    quantity: Option<String>,
    unit: Option<String>,
    description: Option<String>,
    unit_price: Option<String>,
    line_amount: Option<String>,
    subtotals: Vec<ParsedSubtotal>,
    current_subtotal: Option<ParsedSubtotal>,
}

#[derive(Debug, Default)]
struct ParsedPaymentTerm {
    id: Option<String>,
    means: Option<String>,
    amount: Option<String>,
    currency: Option<String>,
    due_date: Option<String>,
}

impl UblHandler for ParsedFiscal {
    fn text(&mut self, path: &[&str], attrs: &Attrs, text: &str) {
        match path {
            [_, "ID"] => set_once(&mut self.number, text),
            [_, "IssueDate"] => set_once(&mut self.issue_date, text),
            [_, "DueDate"] => set_once(&mut self.due_date, text),
            [_, "InvoiceTypeCode"] => set_once(&mut self.type_code, text),
            [_, "DocumentCurrencyCode"] => set_once(&mut self.currency, text),
            [_, "AccountingSupplierParty", rest @ ..] => self.supplier.handle(rest, attrs, text),
            [_, "AccountingCustomerParty", rest @ ..] => self.customer.handle(rest, attrs, text),
            [_, "TaxTotal", "TaxSubtotal", rest @ ..] => self
                .current_subtotal
                .get_or_insert_with(Default::default)
                .handle(rest, text),
            [_, "LegalMonetaryTotal" | "RequestedMonetaryTotal", "LineExtensionAmount"] => {
                set_once(&mut self.line_extension_amount, text)
            }
            [_, "LegalMonetaryTotal" | "RequestedMonetaryTotal", "PayableAmount"] => {
                set_once(&mut self.payable_amount, text);
                set_attr_once(&mut self.payable_currency, attrs, "currencyID");
            }
            [_, "DiscrepancyResponse", "ResponseCode"] => set_once(&mut self.response_code, text),
            [_, "DiscrepancyResponse", "Description"] => {
                append(&mut self.response_description, text)
            }
            [_, "BillingReference", "InvoiceDocumentReference", "ID"] => {
                set_once(&mut self.reference_number, text)
            }
            [_, "BillingReference", "InvoiceDocumentReference", "DocumentTypeCode"] => {
                set_once(&mut self.reference_type, text)
            }
            [_, "PaymentTerms", rest @ ..] => self
                .current_term
                .get_or_insert_with(Default::default)
                .handle(rest, attrs, text),
            [_, "InvoiceLine" | "CreditNoteLine" | "DebitNoteLine", rest @ ..] => self
                .current_line
                .get_or_insert_with(Default::default)
                .handle(rest, attrs, text),
            _ => {}
        }
    }

    fn end(&mut self, path: &[&str]) {
        match path {
            [_, "TaxTotal", "TaxSubtotal"] => {
                if let Some(subtotal) = self.current_subtotal.take() {
                    self.tax_subtotals.push(subtotal);
                }
            }
            [_, "PaymentTerms"] => {
                if let Some(term) = self.current_term.take() {
                    self.payment_terms.push(term);
                }
            }
            [_, "InvoiceLine" | "CreditNoteLine" | "DebitNoteLine"] => {
                if let Some(line) = self.current_line.take() {
                    self.lines.push(line);
                }
            }
            [
                _,
                "InvoiceLine" | "CreditNoteLine" | "DebitNoteLine",
                "TaxTotal",
                "TaxSubtotal",
            ] => {
                if let Some(line) = self.current_line.as_mut() {
                    if let Some(subtotal) = line.current_subtotal.take() {
                        line.subtotals.push(subtotal);
                    }
                }
            }
            _ => {}
        }
    }
}

impl ParsedSubtotal {
    fn handle(&mut self, rel: &[&str], text: &str) {
        match rel {
            ["TaxableAmount"] => set_once(&mut self.taxable_amount, text),
            ["TaxAmount"] => set_once(&mut self.tax_amount, text),
            ["TaxCategory", "TaxScheme", "ID"] => set_once(&mut self.scheme_id, text),
            _ => {}
        }
    }

    fn into_subtotal(self) -> Result<TaxSubtotal, ConvertError> {
        Ok(TaxSubtotal {
            scheme_id: self.scheme_id.unwrap_or_default(),
            taxable_amount: parse_decimal("cbc:TaxableAmount", self.taxable_amount)?,
            tax_amount: parse_decimal("cbc:TaxAmount", self.tax_amount)?,
        })
    }
}

impl ParsedLine {
    fn handle(&mut self, rel: &[&str], attrs: &Attrs, text: &str) {
        match rel {
            ["ID"] => set_once(&mut self.id, text),
            ["InvoicedQuantity" | "CreditedQuantity" | "DebitedQuantity"] => {
                set_once(&mut self.quantity, text);
                set_attr_once(&mut self.unit, attrs, "unitCode");
            }
            ["LineExtensionAmount"] => set_once(&mut self.line_amount, text),
            ["Item", "Description"] => append(&mut self.description, text),
            ["Item", "SellersItemIdentification", "ID"] => set_once(&mut self.item_code, text),
            ["Price", "PriceAmount"] => set_once(&mut self.unit_price, text),
            ["TaxTotal", "TaxSubtotal", rest @ ..] => self
                .current_subtotal
                .get_or_insert_with(Default::default)
                .handle(rest, text),
            _ => {}
        }
    }

    fn into_line(self) -> Result<DocumentLine, ConvertError> {
        let subtotals = self
            .subtotals
            .into_iter()
            .map(ParsedSubtotal::into_subtotal)
            .collect::<Result<Vec<_>, _>>()?;
        let igv = subtotals
            .iter()
            .find(|s| s.scheme_id == tax_scheme::IGV)
            .or_else(|| subtotals.first())
            .and_then(|s| s.tax_amount);

        Ok(DocumentLine {
            id: self.id,
            item_code: self.item_code,
            quantity: parse_decimal("line quantity", self.quantity)?,
            unit: self.unit,
            description: self.description,
            unit_price: parse_decimal("line cbc:PriceAmount", self.unit_price)?,
            line_amount: parse_decimal("line cbc:LineExtensionAmount", self.line_amount)?,
            igv,
        })
    }
}

impl ParsedPaymentTerm {
    fn handle(&mut self, rel: &[&str], attrs: &Attrs, text: &str) {
        match rel {
            ["ID"] => set_once(&mut self.id, text),
            ["PaymentMeansID"] => set_once(&mut self.means, text),
            ["Amount"] => {
                set_once(&mut self.amount, text);
                set_attr_once(&mut self.currency, attrs, "currencyID");
            }
            ["PaymentDueDate"] => set_once(&mut self.due_date, text),
            _ => {}
        }
    }

    fn into_term(self) -> Result<PaymentTerm, ConvertError> {
        Ok(PaymentTerm {
            id: self.id,
            means: self.means,
            amount: parse_decimal("cac:PaymentTerms/cbc:Amount", self.amount)?,
            currency: self.currency,
            due_date: parse_date("cbc:PaymentDueDate", self.due_date)?,
        })
    }
}

impl ParsedFiscal {
    fn into_document(self, root: FiscalRoot) -> Result<FiscalDocument, ConvertError> {
        let number = required("cbc:ID", self.number)?;
        let issue_date = parse_date("cbc:IssueDate", self.issue_date)?
            .ok_or(ConvertError::MissingField("cbc:IssueDate"))?;

        let supplier = self.supplier.into_party();
        if supplier.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            return Err(ConvertError::MissingField("cac:AccountingSupplierParty ID"));
        }

        let reference = (self.reference_number.is_some() || self.reference_type.is_some())
            .then(|| DocumentReference {
                number: self.reference_number,
                type_code: self.reference_type,
            });
        let discrepancy = (self.response_code.is_some() || self.response_description.is_some())
            .then(|| Discrepancy {
                response_code: self.response_code,
                description: self.response_description,
            });

        Ok(FiscalDocument {
            root,
            number,
            issue_date,
            due_date: parse_date("cbc:DueDate", self.due_date)?,
            type_code: self.type_code,
            currency: self.currency.or(self.payable_currency),
            supplier,
            customer: self.customer.into_party(),
            tax_subtotals: self
                .tax_subtotals
                .into_iter()
                .map(ParsedSubtotal::into_subtotal)
                .collect::<Result<_, _>>()?,
            line_extension_amount: parse_decimal(
                "cbc:LineExtensionAmount",
                self.line_extension_amount,
            )?,
            payable_amount: parse_decimal("cbc:PayableAmount", self.payable_amount)?,
            reference,
            discrepancy,
            lines: self
                .lines
                .into_iter()
                .map(ParsedLine::into_line)
                .collect::<Result<_, _>>()?,
            payment_terms: self
                .payment_terms
                .into_iter()
                .map(ParsedPaymentTerm::into_term)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const FACTURA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
         xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
         xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2"
         xmlns:ext="urn:oasis:names:specification:ubl:schema:xsd:CommonExtensionComponents-2">
  <ext:UBLExtensions><ext:UBLExtension><ext:ExtensionContent/></ext:UBLExtension></ext:UBLExtensions>
  <cbc:UBLVersionID>2.1</cbc:UBLVersionID>
  <cbc:ID>F001-123</cbc:ID>
  <cbc:IssueDate>2024-03-15</cbc:IssueDate>
  <cbc:InvoiceTypeCode listID="0101">01</cbc:InvoiceTypeCode>
  <cbc:DocumentCurrencyCode>PEN</cbc:DocumentCurrencyCode>
  <cac:Signature>
    <cbc:ID>IDSignST</cbc:ID>
    <cac:SignatoryParty><cac:PartyIdentification><cbc:ID>99999999999</cbc:ID></cac:PartyIdentification></cac:SignatoryParty>
  </cac:Signature>
  <cac:AccountingSupplierParty>
    <cac:Party>
      <cac:PartyIdentification><cbc:ID schemeID="6">20123456789</cbc:ID></cac:PartyIdentification>
      <cac:PartyLegalEntity><cbc:RegistrationName><![CDATA[ACME S.A.C.]]></cbc:RegistrationName></cac:PartyLegalEntity>
    </cac:Party>
  </cac:AccountingSupplierParty>
  <cac:AccountingCustomerParty>
    <cac:Party>
      <cac:PartyIdentification><cbc:ID schemeID="6">20987654321</cbc:ID></cac:PartyIdentification>
      <cac:PartyLegalEntity><cbc:RegistrationName>CLIENTE S.A.</cbc:RegistrationName></cac:PartyLegalEntity>
    </cac:Party>
  </cac:AccountingCustomerParty>
  <cac:PaymentTerms>
    <cbc:ID>FormaPago</cbc:ID>
    <cbc:PaymentMeansID>Contado</cbc:PaymentMeansID>
  </cac:PaymentTerms>
  <cac:TaxTotal>
    <cbc:TaxAmount currencyID="PEN">180.00</cbc:TaxAmount>
    <cac:TaxSubtotal>
      <cbc:TaxableAmount currencyID="PEN">1000.00</cbc:TaxableAmount>
      <cbc:TaxAmount currencyID="PEN">180.00</cbc:TaxAmount>
      <cac:TaxCategory><cac:TaxScheme><cbc:ID>1000</cbc:ID><cbc:Name>IGV</cbc:Name></cac:TaxScheme></cac:TaxCategory>
    </cac:TaxSubtotal>
  </cac:TaxTotal>
  <cac:LegalMonetaryTotal>
    <cbc:LineExtensionAmount currencyID="PEN">1000.00</cbc:LineExtensionAmount>
    <cbc:PayableAmount currencyID="PEN">1180.00</cbc:PayableAmount>
  </cac:LegalMonetaryTotal>
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cbc:InvoicedQuantity unitCode="NIU">10</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="PEN">1000.00</cbc:LineExtensionAmount>
    <cac:TaxTotal>
      <cbc:TaxAmount currencyID="PEN">180.00</cbc:TaxAmount>
      <cac:TaxSubtotal>
        <cbc:TaxAmount currencyID="PEN">180.00</cbc:TaxAmount>
        <cac:TaxCategory><cac:TaxScheme><cbc:ID>1000</cbc:ID></cac:TaxScheme></cac:TaxCategory>
      </cac:TaxSubtotal>
    </cac:TaxTotal>
    <cac:Item><cbc:Description><![CDATA[TECLADO USB]]></cbc:Description></cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="PEN">100.00</cbc:PriceAmount></cac:Price>
  </cac:InvoiceLine>
</Invoice>"#;

    #[test]
    fn parses_invoice_header() {
        let doc = parse_fiscal_document(FACTURA, FiscalRoot::Invoice).unwrap();
        assert_eq!(doc.number, "F001-123");
        assert_eq!(doc.issue_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(doc.type_code.as_deref(), Some("01"));
        assert_eq!(doc.currency.as_deref(), Some("PEN"));
        assert_eq!(doc.supplier.id.as_deref(), Some("20123456789"));
        assert_eq!(doc.supplier.id_scheme.as_deref(), Some("6"));
        assert_eq!(doc.supplier.name.as_deref(), Some("ACME S.A.C."));
        assert_eq!(doc.customer.id.as_deref(), Some("20987654321"));
        assert_eq!(doc.tax_amount(tax_scheme::IGV), Some(dec!(180.00)));
        assert_eq!(doc.payable_amount, Some(dec!(1180.00)));
        assert_eq!(doc.payment_terms.len(), 1);
        assert_eq!(doc.payment_terms[0].means.as_deref(), Some("Contado"));
    }

    #[test]
    fn signature_ids_are_not_document_fields() {
        let doc = parse_fiscal_document(FACTURA, FiscalRoot::Invoice).unwrap();
        assert_ne!(doc.number, "IDSignST");
        assert_ne!(doc.supplier.id.as_deref(), Some("99999999999"));
    }

    #[test]
    fn parses_lines() {
        let doc = parse_fiscal_document(FACTURA, FiscalRoot::Invoice).unwrap();
        assert_eq!(doc.lines.len(), 1);
        let line = &doc.lines[0];
        assert_eq!(line.id.as_deref(), Some("1"));
        assert_eq!(line.quantity, Some(dec!(10)));
        assert_eq!(line.unit.as_deref(), Some("NIU"));
        assert_eq!(line.description.as_deref(), Some("TECLADO USB"));
        assert_eq!(line.unit_price, Some(dec!(100.00)));
        assert_eq!(line.line_amount, Some(dec!(1000.00)));
        assert_eq!(line.igv, Some(dec!(180.00)));
    }

    #[test]
    fn wrong_root_is_reported() {
        let err = parse_fiscal_document(FACTURA, FiscalRoot::CreditNote).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::RootMismatch { expected: "CreditNote", ref found } if found == "Invoice"
        ));
    }

    #[test]
    fn missing_supplier_is_rejected() {
        let xml = r#"<Invoice><ID>F001-1</ID><IssueDate>2024-01-01</IssueDate></Invoice>"#;
        assert!(matches!(
            parse_fiscal_document(xml, FiscalRoot::Invoice),
            Err(ConvertError::MissingField("cac:AccountingSupplierParty ID"))
        ));
    }

    #[test]
    fn bad_amount_is_rejected() {
        let xml = FACTURA.replace(">1180.00<", ">mil<");
        assert!(matches!(
            parse_fiscal_document(&xml, FiscalRoot::Invoice),
            Err(ConvertError::InvalidValue {
                field: "cbc:PayableAmount",
                ..
            })
        ));
    }
}
