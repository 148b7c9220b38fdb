//! Currency formatting in the en-US style used by the price widgets.
//!
//! `$1,234.50`, `₫25,000,000`, and compact `$1.5M` for volume columns.

use crate::domain::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_FRACTION_DIGITS: usize = 2;

/// Shown for amounts that are not finite numbers.
const ZERO_DISPLAY: &str = "$0.00";
const ZERO_COMPACT_DISPLAY: &str = "$0";

/// Compact notation steps, ascending.
const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Currencies the formatter knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Vnd,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Vnd => "VND",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Vnd => "₫",
        }
    }

    /// Dong has no minor unit, so whole amounts print without decimals.
    fn min_fraction_digits(&self) -> usize {
        match self {
            Self::Usd | Self::Eur => 2,
            Self::Vnd => 0,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "VND" => Ok(Self::Vnd),
            other => Err(ValidationError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Parse an amount that arrived as text.
///
/// Blank input is zero. Anything unparsable becomes NaN, which the
/// formatters render as zero.
pub fn parse_amount(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Format an amount with symbol, thousands separators and up to 2 decimals.
///
/// ```
/// use vn_kyc_mcp_server::format::{format_currency, Currency};
///
/// assert_eq!(format_currency(41700.5, Currency::Usd), "$41,700.50");
/// assert_eq!(format_currency(25_000_000.0, Currency::Vnd), "₫25,000,000");
/// ```
pub fn format_currency(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() {
        return ZERO_DISPLAY.to_string();
    }

    let rounded = round_fraction(amount.abs());
    let number = format_number(rounded, currency.min_fraction_digits());
    with_sign(amount, currency.symbol(), &number, "")
}

/// Format a USD amount in compact notation: `$999`, `$1.23K`, `$1.5M`.
pub fn format_compact_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_COMPACT_DISPLAY.to_string();
    }

    let abs = amount.abs();
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(size, _)| abs >= *size)
        .unwrap_or(0);
    let mut scaled = round_fraction(abs / COMPACT_UNITS[unit].0);

    // 999_999 rounds to 1000K, which reads better as 1M
    if scaled >= 1000.0 && unit + 1 < COMPACT_UNITS.len() {
        unit += 1;
        scaled = round_fraction(abs / COMPACT_UNITS[unit].0);
    }

    let number = format_number(scaled, 0);
    with_sign(amount, "$", &number, COMPACT_UNITS[unit].1)
}

/// Values past 2^53 carry no fraction, and scaling them can overflow.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

fn round_fraction(value: f64) -> f64 {
    if value.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let factor = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    (value * factor).round() / factor
}

fn with_sign(original: f64, symbol: &str, number: &str, suffix: &str) -> String {
    let sign = if original.is_sign_negative() { "-" } else { "" };
    format!("{}{}{}{}", sign, symbol, number, suffix)
}

/// Render a non-negative, already rounded value with grouping and
/// trailing fraction zeros trimmed down to `min_fraction`.
fn format_number(value: f64, min_fraction: usize) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let grouped = group_thousands(int_part);
    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
