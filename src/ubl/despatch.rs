//! DespatchAdvice (Guía de Remisión) parsing.
//!
//! Handles both the 2022 GRE layout (`Shipment/Delivery/Despatch`) and the
//! earlier one that placed the departure point in `Shipment/OriginAddress`.

use super::party::ParsedParty;
use super::reader::{Attrs, UblHandler, walk};
use super::values::{append, parse_date, parse_decimal, required, set_attr_once, set_once};
use crate::core::{ConvertError, DespatchAdvice, DespatchLine};

const ROOT: &str = "DespatchAdvice";

/// Parse a SUNAT UBL 2.1 DespatchAdvice.
pub fn parse_despatch_advice(xml: &str) -> Result<DespatchAdvice, ConvertError> {
    let mut parsed = ParsedDespatch::default();
    let root = walk(xml, &mut parsed)?;
    if root != ROOT {
        return Err(ConvertError::RootMismatch {
            expected: ROOT,
            found: root,
        });
    }
    parsed.into_despatch()
}

#[derive(Debug, Default)]
struct ParsedDespatch {
    number: Option<String>,
    issue_date: Option<String>,
    type_code: Option<String>,
    supplier: ParsedParty,
    recipient: ParsedParty,
    reason_code: Option<String>,
    reason_description: Option<String>,
    transfer_date: Option<String>,
    gross_weight: Option<String>,
    weight_unit: Option<String>,
    origin_address: Option<String>,
    origin_street: Option<String>,
    delivery_address: Option<String>,
    delivery_street: Option<String>,
    lines: Vec<ParsedDespatchLine>,
    current_line: Option<ParsedDespatchLine>,
}

#[derive(Debug, Default)]
struct ParsedDespatchLine {
    id: Option<String>,
    item_code: Option<String>,
    quantity: Option<String>,
    unit: Option<String>,
    description: Option<String>,
}

impl UblHandler for ParsedDespatch {
    fn text(&mut self, path: &[&str], attrs: &Attrs, text: &str) {
        match path {
            [_, "ID"] => set_once(&mut self.number, text),
            [_, "IssueDate"] => set_once(&mut self.issue_date, text),
            [_, "DespatchAdviceTypeCode"] => set_once(&mut self.type_code, text),
            [_, "DespatchSupplierParty", rest @ ..] => self.supplier.handle(rest, attrs, text),
            [_, "DeliveryCustomerParty", rest @ ..] => self.recipient.handle(rest, attrs, text),
            [_, "Shipment", "HandlingCode"] => set_once(&mut self.reason_code, text),
            [_, "Shipment", "HandlingInstructions" | "Information"] => {
                set_once(&mut self.reason_description, text)
            }
            [_, "Shipment", "GrossWeightMeasure"] => {
                set_once(&mut self.gross_weight, text);
                set_attr_once(&mut self.weight_unit, attrs, "unitCode");
            }
            [_, "Shipment", "ShipmentStage", "TransitPeriod", "StartDate"] => {
                set_once(&mut self.transfer_date, text)
            }
            [_, "Shipment", "Delivery", "DeliveryAddress", "AddressLine", "Line"] => {
                append(&mut self.delivery_address, text)
            }
            [_, "Shipment", "Delivery", "DeliveryAddress", "StreetName"] => {
                set_once(&mut self.delivery_street, text)
            }
            [
                _,
                "Shipment",
                "Delivery",
                "Despatch",
                "DespatchAddress",
                "AddressLine",
                "Line",
            ]
            | [_, "Shipment", "OriginAddress", "AddressLine", "Line"] => {
                append(&mut self.origin_address, text)
            }
            [_, "Shipment", "Delivery", "Despatch", "DespatchAddress", "StreetName"]
            | [_, "Shipment", "OriginAddress", "StreetName"] => {
                set_once(&mut self.origin_street, text)
            }
            [_, "DespatchLine", rest @ ..] => self
                .current_line
                .get_or_insert_with(Default::default)
                .handle(rest, attrs, text),
            _ => {}
        }
    }

    fn end(&mut self, path: &[&str]) {
        if let [_, "DespatchLine"] = path {
            if let Some(line) = self.current_line.take() {
                self.lines.push(line);
            }
        }
    }
}

impl ParsedDespatchLine {
    fn handle(&mut self, rel: &[&str], attrs: &Attrs, text: &str) {
        match rel {
            ["ID"] => set_once(&mut self.id, text),
            ["DeliveredQuantity"] => {
                set_once(&mut self.quantity, text);
                set_attr_once(&mut self.unit, attrs, "unitCode");
            }
            ["Item", "Description"] => append(&mut self.description, text),
            ["Item", "SellersItemIdentification", "ID"] => set_once(&mut self.item_code, text),
            _ => {}
        }
    }

    fn into_line(self) -> Result<DespatchLine, ConvertError> {
        Ok(DespatchLine {
            id: self.id,
            item_code: self.item_code,
            quantity: parse_decimal("cbc:DeliveredQuantity", self.quantity)?,
            unit: self.unit,
            description: self.description,
        })
    }
}

impl ParsedDespatch {
    fn into_despatch(self) -> Result<DespatchAdvice, ConvertError> {
        let number = required("cbc:ID", self.number)?;
        let issue_date = parse_date("cbc:IssueDate", self.issue_date)?
            .ok_or(ConvertError::MissingField("cbc:IssueDate"))?;

        let supplier = self.supplier.into_party();
        if supplier.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            return Err(ConvertError::MissingField("cac:DespatchSupplierParty ID"));
        }

        Ok(DespatchAdvice {
            number,
            issue_date,
            type_code: self.type_code,
            supplier,
            recipient: self.recipient.into_party(),
            reason_code: self.reason_code,
            reason_description: self.reason_description,
            transfer_date: parse_date("cbc:StartDate", self.transfer_date)?,
            gross_weight: parse_decimal("cbc:GrossWeightMeasure", self.gross_weight)?,
            weight_unit: self.weight_unit,
            origin_address: self.origin_address.or(self.origin_street),
            delivery_address: self.delivery_address.or(self.delivery_street),
            lines: self
                .lines
                .into_iter()
                .map(ParsedDespatchLine::into_line)
                .collect::<Result<_, _>>()?,
        })
    }
}
