use super::reader::Attrs;
use super::values::{set_attr_once, set_once};
use crate::core::Party;

/// Collects a UBL party block (`AccountingSupplierParty`,
/// `DeliveryCustomerParty`, ...). Paths are relative to the wrapper element.
#[derive(Debug, Default)]
pub(crate) struct ParsedParty {
    id: Option<String>,
    scheme: Option<String>,
    // UBL 2.0 layout used by documents issued before 2018
    legacy_id: Option<String>,
    legacy_scheme: Option<String>,
    registration_name: Option<String>,
    trade_name: Option<String>,
}

impl ParsedParty {
    pub(crate) fn handle(&mut self, rel: &[&str], attrs: &Attrs, text: &str) {
        match rel {
            ["Party", "PartyIdentification", "ID"] => {
                set_once(&mut self.id, text);
                set_attr_once(&mut self.scheme, attrs, "schemeID");
            }
            ["CustomerAssignedAccountID"] => set_once(&mut self.legacy_id, text),
            ["AdditionalAccountID"] => set_once(&mut self.legacy_scheme, text),
            ["Party", "PartyLegalEntity", "RegistrationName"] => {
                set_once(&mut self.registration_name, text)
            }
            ["Party", "PartyName", "Name"] => set_once(&mut self.trade_name, text),
            _ => {}
        }
    }

    pub(crate) fn into_party(self) -> Party {
        Party {
            id: self.id.or(self.legacy_id),
            id_scheme: self.scheme.or(self.legacy_scheme),
            name: self.registration_name.or(self.trade_name),
        }
    }
}
