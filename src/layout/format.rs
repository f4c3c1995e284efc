//! Text formatting of report values

use chrono::{DateTime, Utc};

/// Date format of the sample information block
pub const DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p UTC";

/// Vendor scientific notation with 6 fractional digits and a signed
/// three-digit exponent, e.g. `1.119809e+004`
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.6e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:03}", mantissa, sign, exp.abs())
        }
        Err(_) => formatted,
    }
}

/// Axis tick label: whole numbers without decimals, others trimmed
pub fn format_tick(value: f64) -> String {
    if value == value.trunc() {
        return format!("{:.0}", value);
    }
    let fixed = format!("{:.3}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Date shown on the report, or an empty string
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

/// Optional number with a unit suffix, or an empty string
pub fn format_quantity(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if unit.is_empty() {
                format_tick(v)
            } else {
                format!("{} {}", format_tick(v), unit)
            }
        }
        _ => String::new(),
    }
}
