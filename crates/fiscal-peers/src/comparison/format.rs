//! Display formatting for fiscal figures.
//!
//! Every formatter is total over `Option<f64>`: `None` renders as [`NOT_AVAILABLE`] and any
//! finite number (zero and negatives included) renders without panicking.

pub const NOT_AVAILABLE: &str = "N/A";

/// Whole currency units, thousands-grouped: `$1,234,567`.
pub fn currency(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${}", group_thousands(&fixed(value, 0))),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Magnitude-scaled currency: `$1.5B`, `$12.3M`, `$850K`, or plain currency below 1,000.
pub fn compact_currency(value: Option<f64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("${}B", fixed(value / 1e9, 1))
    } else if magnitude >= 1e6 {
        format!("${}M", fixed(value / 1e6, 1))
    } else if magnitude >= 1e3 {
        format!("${}K", fixed(value / 1e3, 0))
    } else {
        currency(Some(value))
    }
}

/// Fraction in `[0, 1]` shown as a percentage: `0.123` → `12.3%`.
pub fn percent_fraction(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{}%", fixed(value * 100.0, decimals)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Value already on the 0-100 scale: `12.3` → `12.3%`.
pub fn percent_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) => format!("{}%", fixed(value, decimals)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Tax rate per $100 of valuation with four decimal places: `$0.4825`.
pub fn rate(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${}", fixed(value, 4)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn population(value: Option<f64>) -> String {
    match value {
        Some(value) => group_thousands(&fixed(value, 0)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fixed-point rendering that rounds exact ties away from zero.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return format!("{:.*}", decimals, value);
    }
    let rounded = scaled.round() / factor;
    // Avoid "-0" / "-0.0" once rounding has collapsed the magnitude.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

/// Insert `,` separators into the integer part of an already formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
