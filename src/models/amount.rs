//! Amount type for representing money values
//!
//! Amounts are real numbers stored as `f64` and serialized as bare JSON
//! numbers, so that existing data files (which hold plain floats) load as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A monetary amount in the user's single currency
///
/// Amounts typed by the user are never negative (see [`Amount::parse`]), but
/// derived values such as a balance can be.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a raw value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is an ordinary number (not infinite or NaN)
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Add two amounts, or `None` if the sum is not a finite number
    ///
    /// JSON has no representation for infinity, so a stored total must stay
    /// finite.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let sum = self.0 + other.0;
        sum.is_finite().then_some(Self(sum))
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts formats: "150", "150.5", " 150 ", "150,5". The result must be
    /// a finite number that is zero or positive.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let normalized = trimmed.replace(',', ".");
        let value: f64 = normalized
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(trimmed.to_string()));
        }
        if value < 0.0 {
            return Err(AmountParseError::Negative(trimmed.to_string()));
        }

        Ok(Self(value))
    }

    /// Format with a currency symbol, e.g. `150₽` or `12.50₽`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{}", self, symbol)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount is empty"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::Negative(s) => write!(f, "Amount cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
