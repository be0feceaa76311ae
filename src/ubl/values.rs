use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::reader::Attrs;
use crate::core::ConvertError;

/// Keep the first value seen for a slot.
pub(crate) fn set_once(slot: &mut Option<String>, text: &str) {
    if slot.is_none() {
        *slot = Some(text.to_string());
    }
}

/// Join repeated text (multiple descriptions, split CDATA) with a space.
pub(crate) fn append(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(text);
        }
        None => *slot = Some(text.to_string()),
    }
}

pub(crate) fn set_attr_once(slot: &mut Option<String>, attrs: &Attrs, key: &str) {
    if let Some(value) = attrs.get(key) {
        set_once(slot, value);
    }
}

pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, ConvertError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConvertError::MissingField(field))
}

/// Parse an `xsd:date` (`YYYY-MM-DD`). Absent values are `Ok(None)`.
pub(crate) fn parse_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, ConvertError> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .map_err(|_| ConvertError::InvalidValue { field, value: v })
        })
        .transpose()
}

/// Parse a decimal amount or quantity. Absent values are `Ok(None)`.
pub(crate) fn parse_decimal(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Decimal>, ConvertError> {
    value
        .map(|v| {
            Decimal::from_str(v.trim())
                .map_err(|_| ConvertError::InvalidValue { field, value: v })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn set_once_keeps_first() {
        let mut slot = None;
        set_once(&mut slot, "a");
        set_once(&mut slot, "b");
        assert_eq!(slot.as_deref(), Some("a"));
    }

    #[test]
    fn append_joins() {
        let mut slot = None;
        append(&mut slot, "CAJA");
        append(&mut slot, "X 12");
        assert_eq!(slot.as_deref(), Some("CAJA X 12"));
    }

    #[test]
    fn required_rejects_blank() {
        assert!(matches!(
            required("cbc:ID", Some("  ".into())),
            Err(ConvertError::MissingField("cbc:ID"))
        ));
        assert!(matches!(
            required("cbc:ID", None),
            Err(ConvertError::MissingField("cbc:ID"))
        ));
        assert_eq!(required("cbc:ID", Some(" F001-1 ".into())).unwrap(), "F001-1");
    }

    #[test]
    fn parses_dates_and_amounts() {
        assert_eq!(
            parse_date("d", Some("2024-03-15".into())).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date("d", None).unwrap(), None);
        assert!(matches!(
            parse_date("d", Some("15/03/2024".into())),
            Err(ConvertError::InvalidValue { field: "d", .. })
        ));

        assert_eq!(
            parse_decimal("a", Some("1180.00".into())).unwrap(),
            Some(dec!(1180.00))
        );
        assert!(parse_decimal("a", Some("1.180,00".into())).is_err());
    }
}
