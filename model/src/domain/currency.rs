use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid amount {0}: expected a finite, non-negative number")]
    InvalidAmount(f64),
    #[error("Unknown currency locale {0:?}, expected en-IN or en-US")]
    UnknownLocale(String),
}

/// Locale used to render amounts, it fixes both the symbol and the digit
/// grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum CurrencyLocale {
    /// Rupee, lakh/crore grouping: `₹12,34,567`
    #[default]
    #[serde(rename = "en-IN")]
    EnIn,
    /// Dollar, thousands grouping: `$1,234,567`
    #[serde(rename = "en-US")]
    EnUs,
}

impl CurrencyLocale {
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyLocale::EnIn => "₹",
            CurrencyLocale::EnUs => "$",
        }
    }

    /// Size of the digit groups left of the last three digits.
    fn leading_group(&self) -> usize {
        match self {
            CurrencyLocale::EnIn => 2,
            CurrencyLocale::EnUs => 3,
        }
    }
}

impl FromStr for CurrencyLocale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-in" => Ok(CurrencyLocale::EnIn),
            "en-us" => Ok(CurrencyLocale::EnUs),
            _ => Err(Error::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for CurrencyLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyLocale::EnIn => write!(f, "en-IN"),
            CurrencyLocale::EnUs => write!(f, "en-US"),
        }
    }
}

/// Render a whole amount with the symbol and grouping of the locale.
pub fn format(amount: u64, locale: CurrencyLocale) -> String {
    format!("{}{}", locale.symbol(), group_digits(&amount.to_string(), locale))
}

/// Same as [`format`] for numbers coming from untyped input. Fractions are
/// rounded to the nearest whole unit.
pub fn format_raw(value: f64, locale: CurrencyLocale) -> Result<String, Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidAmount(value));
    }
    Ok(format(value.round() as u64, locale))
}

fn group_digits(digits: &str, locale: CurrencyLocale) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut rest, last) = digits.split_at(digits.len() - 3);
    let step = locale.leading_group();

    let mut groups = vec![last];
    while rest.len() > step {
        let (head, group) = rest.split_at(rest.len() - step);
        groups.push(group);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(",")
}
