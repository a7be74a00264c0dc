//! Monetary amounts as (decimal, currency code) pairs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its ISO 4217 currency code.
///
/// Amounts travel as strings on the wire (the `serde-with-str` feature of
/// `rust_decimal`), matching the merchant backend's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g. "USD", "SEK").
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display: "$12.34" for symbol currencies, "12.34 SEK"
    /// otherwise.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match symbol_for(&self.currency_code) {
            Some(symbol) if amount.is_sign_negative() => {
                format!("-{symbol}{:.2}", amount.abs())
            }
            Some(symbol) => format!("{symbol}{amount:.2}"),
            None => format!("{amount:.2} {}", self.currency_code),
        }
    }

    /// Display the absolute amount negated, e.g. discounts shown as
    /// "-$5.00" regardless of the sign the backend sent.
    #[must_use]
    pub fn display_negated(&self) -> String {
        Self {
            amount: -self.amount.abs(),
            currency_code: self.currency_code.clone(),
        }
        .display()
    }
}

fn symbol_for(currency_code: &str) -> Option<&'static str> {
    match currency_code {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}
