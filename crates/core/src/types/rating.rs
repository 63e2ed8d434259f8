//! Star rating attached to a customer review.

use serde::{Deserialize, Serialize};

/// Error returned when a rating is outside `1..=5`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("stars must be between {min} and {max}", min = Stars::MIN, max = Stars::MAX)]
pub struct StarsError;

/// A review rating from one to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Stars(i32);

impl Stars {
    /// Lowest rating.
    pub const MIN: i32 = 1;
    /// Highest rating.
    pub const MAX: i32 = 5;

    /// Validate a rating.
    ///
    /// # Errors
    ///
    /// Returns [`StarsError`] if `value` is outside `1..=5`.
    pub const fn new(value: i32) -> Result<Self, StarsError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(StarsError);
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Stars {
    type Error = StarsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stars> for i32 {
    fn from(stars: Stars) -> Self {
        stars.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Stars {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Stars {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let value = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(value)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Stars {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Stars::new(0).is_err());
        assert_eq!(Stars::new(1).map(Stars::get), Ok(1));
        assert_eq!(Stars::new(5).map(Stars::get), Ok(5));
        assert!(Stars::new(6).is_err());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Stars>("4").is_ok());
        assert!(serde_json::from_str::<Stars>("9").is_err());
    }
}
