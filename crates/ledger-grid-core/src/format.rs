//! Currency display formatting
//!
//! The grid never formats money on its own; it asks a [`CurrencyFormatter`]
//! supplied by the caller. [`CurrencyFormat`] is the stock implementation,
//! configured by default for Tunisian dinar amounts in French notation
//! (`1 234,56 TND`).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats numeric amounts for currency-typed columns
pub trait CurrencyFormatter {
    /// Render an amount for display
    fn format_amount(&self, amount: f64) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format_amount(&self, amount: f64) -> String {
        self(amount)
    }
}

/// Where the currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SymbolPosition {
    /// `$1,234.56`
    Prefix,
    /// `1 234,56 TND`
    #[default]
    Suffix,
}

/// Locale-style currency format settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurrencyFormat {
    /// Currency symbol or code
    pub symbol: String,
    /// Symbol placement
    pub position: SymbolPosition,
    /// Separator between the integer and fraction parts
    pub decimal_separator: char,
    /// Separator between groups of three integer digits (None = no grouping)
    pub group_separator: Option<char>,
    /// Number of fraction digits shown
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::tnd_fr()
    }
}

impl CurrencyFormat {
    /// French notation, dinar suffix: `1 234,56 TND`
    pub fn tnd_fr() -> Self {
        Self {
            symbol: "TND".to_string(),
            position: SymbolPosition::Suffix,
            decimal_separator: ',',
            group_separator: Some('\u{202F}'),
            fraction_digits: 2,
        }
    }

    /// US notation, dollar prefix: `$1,234.56`
    pub fn usd_en() -> Self {
        Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            decimal_separator: '.',
            group_separator: Some(','),
            fraction_digits: 2,
        }
    }

    /// Replace the symbol
    pub fn with_symbol<S: Into<String>>(mut self, symbol: S) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Format the number part only (no symbol)
    pub fn format_number(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let (negative, digits) = self.rounded_digits(amount);

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i.to_string(), Some(f.to_string())),
            None => (digits, None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.group(&int_part));
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(&frac);
        }
        out
    }

    /// Round half away from zero and render as plain `1234.50` digits
    fn rounded_digits(&self, amount: f64) -> (bool, String) {
        match Decimal::from_f64(amount) {
            Some(value) => {
                let mut rounded = value.round_dp_with_strategy(
                    self.fraction_digits,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                rounded.rescale(self.fraction_digits);
                let negative = rounded.is_sign_negative() && !rounded.is_zero();
                (negative, rounded.abs().to_string())
            }
            // Outside Decimal's range; fall back to float formatting
            None => (
                amount < 0.0,
                format!("{:.*}", self.fraction_digits as usize, amount.abs()),
            ),
        }
    }

    fn group(&self, int_part: &str) -> String {
        let Some(sep) = self.group_separator else {
            return int_part.to_string();
        };
        let len = int_part.len();
        let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format_amount(&self, amount: f64) -> String {
        let number = self.format_number(amount);
        match self.position {
            SymbolPosition::Prefix => {
                if let Some(rest) = number.strip_prefix('-') {
                    format!("-{}{}", self.symbol, rest)
                } else {
                    format!("{}{}", self.symbol, number)
                }
            }
            SymbolPosition::Suffix => format!("{} {}", number, self.symbol),
        }
    }
}
