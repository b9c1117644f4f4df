//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are whole-store-currency amounts (no currency code: the cart is
//! single-currency). They are kept as [`Decimal`] so that totals never pick up
//! binary floating-point error, and persist as plain JSON numbers.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// First run of ASCII digits in a display string.
///
/// `\d` is Unicode-aware in `regex`, so the class is spelled out.
static PRICE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex"));

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The display text contains no digits at all.
    #[error("no price digits found in {text:?}")]
    NoDigits {
        /// The text that was searched.
        text: String,
    },
    /// A digit run was found but does not convert to a number.
    #[error("invalid price {digits:?} in {text:?}")]
    Invalid {
        /// The extracted digit run.
        digits: String,
        /// The text it was extracted from.
        text: String,
    },
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of money.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use shopcart_core::Price;
///
/// let price = Price::from_display_text("Price: 150 руб.").unwrap();
/// assert_eq!(price.amount(), Decimal::from(150));
/// assert_eq!(price.times(2).to_string(), "300");
///
/// assert!(Price::from_display_text("Free item").is_err());
/// assert!(Price::new(Decimal::from(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            // Also folds `-0` into the canonical zero.
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Extract a price from rendered display text.
    ///
    /// Only the first contiguous run of ASCII digits is used, so decimal
    /// separators and everything after them are ignored: `"12.50"` yields 12.
    ///
    /// # Errors
    ///
    /// - [`PriceError::NoDigits`] if `text` contains no digit.
    /// - [`PriceError::Invalid`] if the digit run does not fit a decimal.
    pub fn from_display_text(text: &str) -> Result<Self, PriceError> {
        let digits = PRICE_DIGITS_RE
            .find(text)
            .ok_or_else(|| PriceError::NoDigits {
                text: text.to_owned(),
            })?
            .as_str();

        let amount = Decimal::from_str(digits).map_err(|_| PriceError::Invalid {
            digits: digits.to_owned(),
            text: text.to_owned(),
        })?;

        Self::new(amount)
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns this price multiplied by a quantity.
    ///
    /// Saturates at [`Decimal::MAX`] rather than panicking.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Returns `true` for the zero price.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Plain numeric text: `400`, `19.99`, never trailing zeros.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse a structured decimal amount such as `"19.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid {
            digits: s.to_owned(),
            text: s.to_owned(),
        })?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = self.0.normalize();
        if amount.scale() == 0 {
            if let Some(units) = amount.to_u64() {
                return serializer.serialize_u64(units);
            }
        }
        rust_decimal::serde::float::serialize(&amount, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
