//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues; two-decimal rounding is exact in cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Supported currencies. The upstream catalog defaults to EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use kiosk_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(9.0, Currency::EUR);
    /// assert_eq!(price.amount_cents, 900);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "€9.00").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }

    /// Add another Money value.
    ///
    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    pub fn add(&self, other: &Money) -> Money {
        self.try_add(other).expect("currency mismatch in addition")
    }

    /// Try to add another Money value, returning None on currency
    /// mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.checked_add(other.amount_cents)?,
            self.currency,
        ))
    }

    /// Subtract another Money value, returning None on currency
    /// mismatch or overflow. Results may be negative (price deltas).
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.checked_sub(other.amount_cents)?,
            self.currency,
        ))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        Some(Money::new(
            self.amount_cents.checked_mul(factor)?,
            self.currency,
        ))
    }

    /// Sum an iterator of Money values, returning None on currency
    /// mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::add(&self, &other)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
