//! Monetary amounts for product prices and discounts.
//!
//! Stored as `NUMERIC(10, 2)`, so an amount carries at most two decimal
//! places and eight integer digits.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("amount must be a number")]
    NotANumber,
    /// The value is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The value has more than two decimal places.
    #[error("amount can have at most {max} decimal places")]
    TooPrecise {
        /// Maximum decimal places.
        max: u32,
    },
    /// The value does not fit the column.
    #[error("amount is too large")]
    TooLarge,
}

/// A non-negative amount with at most two decimal places.
///
/// Used for both `price` and `discount` on products. The unit of `discount`
/// is whatever the storefront decides; the backend stores it as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Maximum number of decimal places.
    pub const SCALE: u32 = 2;

    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest value a `NUMERIC(10, 2)` column accepts.
    // 9_999_999_999 split into its low and middle 32-bit words, scale 2.
    const MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

    /// Validate a decimal as an amount.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] if the value is negative, too precise, or too large.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        if value.normalize().scale() > Self::SCALE {
            return Err(AmountError::TooPrecise { max: Self::SCALE });
        }
        if value > Self::MAX {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(value.abs()))
    }

    /// Parse an amount from form input such as `"10"` or `"19.99"`.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] if the input is empty, not a number, or out of range.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        let value = Decimal::from_str(trimmed).map_err(|_| AmountError::NotANumber)?;
        Self::new(value)
    }

    /// Get the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Amount {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Amount {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let value = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(value))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Amount {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Amount::parse("10").unwrap().to_string(), "10");
        assert_eq!(Amount::parse(" 19.99 ").unwrap().to_string(), "19.99");
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse("-0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::parse("2.50").unwrap().to_string(), "2.50");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Amount::parse(""), Err(AmountError::Empty));
        assert_eq!(Amount::parse("ten"), Err(AmountError::NotANumber));
        assert_eq!(Amount::parse("-1"), Err(AmountError::Negative));
        assert_eq!(
            Amount::parse("1.999"),
            Err(AmountError::TooPrecise { max: 2 })
        );
        assert_eq!(Amount::parse("100000000"), Err(AmountError::TooLarge));
    }

    #[test]
    fn test_max_fits_column() {
        assert!(Amount::parse("99999999.99").is_ok());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Amount::parse("10.50").unwrap()).unwrap();
        assert_eq!(json, "\"10.50\"");
    }
}
