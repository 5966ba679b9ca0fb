//! Price display formatting.
//!
//! Tier policy: `>= 1M` rounds to one decimal ("$2.9M"), `>= 1K` truncates
//! the thousands quotient ("$999K" for 999,999), below that the whole-dollar
//! amount is truncated and comma-grouped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A price as supplied by the caller: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl From<&str> for PriceInput {
    fn from(s: &str) -> Self {
        PriceInput::Text(s.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(s: String) -> Self {
        PriceInput::Text(s)
    }
}

impl From<f64> for PriceInput {
    fn from(v: f64) -> Self {
        PriceInput::Number(v)
    }
}

impl fmt::Display for PriceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceInput::Number(v) => write!(f, "{v}"),
            PriceInput::Text(s) => f.write_str(s),
        }
    }
}

/// Result of formatting; `parsed` is false when the raw fallback was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDisplay {
    pub text: String,
    pub parsed: bool,
}

pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '$').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_price(input: &PriceInput) -> PriceDisplay {
    let value = match input {
        PriceInput::Number(v) if v.is_finite() => Some(*v),
        PriceInput::Number(_) => None,
        PriceInput::Text(s) => parse_price(s),
    };

    match value {
        Some(v) => PriceDisplay { text: abbreviate(v), parsed: true },
        None => PriceDisplay { text: format!("${input}"), parsed: false },
    }
}

fn abbreviate(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${}K", (value / 1_000.0).trunc() as i64)
    } else {
        format_currency(value)
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$14,410`.
pub fn format_currency(value: f64) -> String {
    let whole = value.trunc() as i64;
    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(whole.unsigned_abs()))
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(s: &str) -> String {
        format_price(&PriceInput::from(s)).text
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(fmt("999"), "$999");
        assert_eq!(fmt("1000"), "$1K");
        assert_eq!(fmt("999999"), "$999K");
        assert_eq!(fmt("1000000"), "$1.0M");
    }

    #[test]
    fn test_separators_and_symbol_stripped() {
        assert_eq!(fmt("$2,850,000"), "$2.9M");
        assert_eq!(fmt(" 450,500 "), "$450K");
        assert_eq!(format_price(&PriceInput::Number(1_240_000.0)).text, "$1.2M");
    }

    #[test]
    fn test_unparseable_falls_back_to_raw() {
        let out = format_price(&PriceInput::from("garbage"));
        assert_eq!(out.text, "$garbage");
        assert!(!out.parsed);
        assert_eq!(fmt("inf"), "$inf");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(14_410), "14,410");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(format_currency(3_599.7), "$3,599");
    }
}
