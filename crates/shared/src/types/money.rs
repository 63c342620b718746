//! Money type with decimal precision and currency.
//!
//! Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., 12.50).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// ISO 4217 currency codes accepted for plans and expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chinese Yuan
    Cny,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Japanese Yen
    Jpy,
    /// British Pound
    Gbp,
    /// Hong Kong Dollar
    Hkd,
    /// South Korean Won
    Krw,
    /// Thai Baht
    Thb,
    /// Singapore Dollar
    Sgd,
    /// Australian Dollar
    Aud,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 10] = [
        Self::Cny,
        Self::Usd,
        Self::Eur,
        Self::Jpy,
        Self::Gbp,
        Self::Hkd,
        Self::Krw,
        Self::Thb,
        Self::Sgd,
        Self::Aud,
    ];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cny => "CNY",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Jpy => "JPY",
            Self::Gbp => "GBP",
            Self::Hkd => "HKD",
            Self::Krw => "KRW",
            Self::Thb => "THB",
            Self::Sgd => "SGD",
            Self::Aud => "AUD",
        }
    }

    /// Number of minor-unit digits used when displaying amounts.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Self::Jpy | Self::Krw => 0,
            _ => 2,
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Converts into `target` using `rate` (1 unit of `self.currency` = `rate` units of `target`).
    ///
    /// Returns `None` if the product overflows or would have to be rounded to
    /// fit a `Decimal`; a converted amount is always exact.
    #[must_use]
    pub fn checked_convert(&self, rate: Decimal, target: Currency) -> Option<Self> {
        let amount = self.amount.checked_mul(rate)?;
        // Decimal rounds away excess fraction digits on multiply.
        if amount.scale() != self.amount.scale() + rate.scale() {
            return None;
        }
        Some(Self {
            amount,
            currency: target,
        })
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| format!("Unknown currency: {s}"))
    }
}
