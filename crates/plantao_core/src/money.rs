//! Value conversion between locale-formatted BRL strings and numbers.
//!
//! Amounts are typed by users as `1.500,00` (dot for thousands, comma for
//! decimals). Every parser here is fail-soft: anything it cannot read becomes
//! zero, so a malformed field contributes nothing to totals instead of
//! stopping the computation.

use serde::{Deserialize, Serialize};

/// Parse a pt-BR decimal such as `"1.500,00"`, `"35"` or `"R$ 980,5"`.
///
/// Thousands dots are stripped before the decimal comma becomes a period.
/// Leading garbage is rejected, trailing garbage after a valid number is
/// ignored. Missing or unreadable input parses to `0.0`.
pub fn parse_decimal(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .trim()
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    leading_number(&cleaned)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a whole number the way a form field holds it (`"4"`, `" 12 "`).
/// Returns `None` when no leading digits are present.
pub fn parse_whole(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| v * sign)
}

/// Longest prefix of `s` that looks like a decimal number.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    let body = &s[digits_start..end];
    if body.is_empty() || body == "." {
        None
    } else {
        Some(&s[..end])
    }
}

/// `gross × (1 − rate/100)`
#[inline]
pub fn net_value(gross: f64, rate_percent: f64) -> f64 {
    gross * (1.0 - rate_percent / 100.0)
}

/// The part of `gross` withheld at `rate_percent`.
#[inline]
pub fn tax_amount(gross: f64, rate_percent: f64) -> f64 {
    gross - net_value(gross, rate_percent)
}

/// Resolve a preset/custom rate pair into a percentage.
///
/// A non-empty custom field wins; otherwise the preset is used unless it is
/// the `outro` placeholder. Nothing usable resolves to zero.
pub fn resolve_rate(preset: Option<&str>, custom: Option<&str>) -> f64 {
    let custom = custom.map(str::trim).filter(|s| !s.is_empty());
    let preset = preset
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != CUSTOM_OPTION);
    custom.or(preset).map(parse_decimal).unwrap_or(0.0)
}

/// Placeholder stored when the user picked "Outro" in a preset list.
pub const CUSTOM_OPTION: &str = "outro";

/// Gross, net and withheld amounts for one shift.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversion {
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

impl Conversion {
    pub fn new(gross: f64, rate_percent: f64) -> Self {
        let net = net_value(gross, rate_percent);
        Self {
            gross,
            net,
            tax: gross - net,
        }
    }

    /// Convert straight from the raw form strings.
    pub fn from_raw(gross: &str, rate_percent: &str) -> Self {
        Self::new(parse_decimal(gross), parse_decimal(rate_percent))
    }
}

/// Format a value as pt-BR currency digits without the symbol (`1.500,00`).
pub fn format_brl(value: f64) -> String {
    let abs_value = value.abs();
    let mut cents_total = (abs_value * 100.0).round() as i64;
    let cents = cents_total % 100;
    cents_total /= 100;

    // Add thousands separators
    let reais_str = cents_total.to_string();
    let mut result = String::new();
    for (i, c) in reais_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    let reais_formatted: String = result.chars().rev().collect();

    if value < 0.0 && (cents_total > 0 || cents > 0) {
        format!("-{},{:02}", reais_formatted, cents)
    } else {
        format!("{},{:02}", reais_formatted, cents)
    }
}

/// Format a percentage the way rate fields store it (`"35"`, `"18,5"`).
pub fn format_rate(rate_percent: f64) -> String {
    if rate_percent.fract() == 0.0 {
        format!("{}", rate_percent as i64)
    } else {
        format!("{rate_percent}").replace('.', ",")
    }
}

/// Format with the currency symbol (`R$ 1.500,00`).
pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_brl(value))
}
