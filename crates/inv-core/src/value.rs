//! Parameter value parsing and SI-prefixed formatting.
//!
//! Part parameters arrive from spreadsheets as free text such as `4.7 nF`,
//! `1.2 kΩ` or `3.3e-6`. InvenTree stores both the display text and a numeric
//! value; [`parse_parameter_value`] derives both.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Unit marker meaning "store the raw text, never parse".
pub const STRING_UNIT: &str = "str";

/// Display text used for empty parameter cells.
pub const EMPTY_DISPLAY: &str = "-";

static VALUE_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s*([μµumkKMGTnpf]?)([A-Za-zΩ°%]*)$",
    )
    .expect("value pattern is valid")
});

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("number pattern is valid")
});

/// Result of parsing a parameter cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedValue {
    /// Text stored as the parameter's `data` field.
    pub display: String,
    /// Value scaled by its SI prefix, stored as `data_numeric`.
    pub numeric: Option<f64>,
}

impl ParsedValue {
    fn text(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            numeric: None,
        }
    }
}

/// Multiplier for a single-character SI prefix.
#[must_use]
pub fn si_multiplier(prefix: &str) -> Option<f64> {
    let factor = match prefix {
        "T" => 1e12,
        "G" => 1e9,
        "M" => 1e6,
        "k" | "K" => 1e3,
        "m" => 1e-3,
        "μ" | "µ" | "u" => 1e-6,
        "n" => 1e-9,
        "p" => 1e-12,
        "f" => 1e-15,
        _ => return None,
    };
    Some(factor)
}

/// Parse a parameter value with optional SI prefix and unit suffix.
///
/// - absent or blank input yields `("-", None)`
/// - unit [`STRING_UNIT`] keeps the raw text without a numeric value
/// - `4.7 nF` yields `("4.7", 4.7e-9)`; only the number is kept as display text
/// - text with a leading number but unparseable suffix keeps just the number
/// - anything else is returned verbatim without a numeric value
#[must_use]
pub fn parse_parameter_value(raw: Option<&str>, unit: &str) -> ParsedValue {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return ParsedValue::text(EMPTY_DISPLAY);
    };

    if unit == STRING_UNIT {
        return ParsedValue::text(raw);
    }

    let value = raw.trim();

    if let Some(caps) = VALUE_WITH_UNIT.captures(value) {
        let number = &caps[1];
        return match number.parse::<f64>() {
            Ok(base) => {
                let multiplier = si_multiplier(&caps[2]).unwrap_or(1.0);
                ParsedValue {
                    display: number.to_string(),
                    numeric: Some(base * multiplier),
                }
            }
            Err(_) => ParsedValue::text(value),
        };
    }

    if let Some(caps) = LEADING_NUMBER.captures(value) {
        let number = &caps[1];
        if let Ok(parsed) = number.parse::<f64>() {
            return ParsedValue {
                display: number.to_string(),
                numeric: Some(parsed),
            };
        }
    }

    ParsedValue::text(value)
}

const FORMAT_PREFIXES: [(f64, &str); 10] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "μ"),
    (1e-9, "n"),
    (1e-12, "p"),
    (1e-15, "f"),
];

/// Format a numeric value with the largest fitting SI prefix, e.g. `4.7 nF`.
///
/// Without `precision` the shortest general representation is used.
#[must_use]
pub fn format_value_with_unit(numeric: Option<f64>, unit: &str, precision: Option<usize>) -> String {
    let Some(value) = numeric.filter(|v| !v.is_nan()) else {
        return EMPTY_DISPLAY.to_string();
    };

    for (threshold, prefix) in FORMAT_PREFIXES {
        if value.abs() >= threshold {
            let scaled = value / threshold;
            let number = precision.map_or_else(
                || format_general(scaled),
                |digits| format!("{scaled:.digits$}"),
            );
            return format!("{number} {prefix}{unit}").trim().to_string();
        }
    }

    let number = precision.map_or_else(
        || format_general(value),
        |digits| format_exponent(value, digits),
    );
    format!("{number} {unit}").trim().to_string()
}

/// Shortest general notation with six significant digits (printf `%g`).
#[must_use]
pub fn format_general(value: f64) -> String {
    const SIGNIFICANT: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{value:.5e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = usize::try_from(SIGNIFICANT - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn format_exponent(value: f64, digits: usize) -> String {
    let scientific = format!("{value:.digits$e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => scientific,
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
