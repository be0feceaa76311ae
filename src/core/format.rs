use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format a monetary amount for CSV output: always at least 2 decimal places,
/// trailing zeros beyond that stripped.
pub fn format_amount(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}

/// Format a quantity without insignificant zeros.
pub fn format_quantity(d: Decimal) -> String {
    d.normalize().to_string()
}

/// ISO 8601 calendar date.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub(crate) fn opt_amount(d: Option<Decimal>) -> String {
    d.map(format_amount).unwrap_or_default()
}

pub(crate) fn opt_quantity(d: Option<Decimal>) -> String {
    d.map(format_quantity).unwrap_or_default()
}

pub(crate) fn opt_date(d: Option<NaiveDate>) -> String {
    d.map(format_date).unwrap_or_default()
}

pub(crate) fn opt_text(s: Option<&String>) -> String {
    s.cloned().unwrap_or_default()
}
