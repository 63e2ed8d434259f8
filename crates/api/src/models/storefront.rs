//! Records written by the public storefront forms.
//!
//! Each `New*` type is built from raw form text with a `parse` constructor
//! that trims input and reports the first unusable field.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shop_core::{Email, ProductId, ReviewId, Stars};

use super::validation::{ValidationError, required};

/// A published customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub name: String,
    pub stars: Stars,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// A review submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub name: String,
    pub stars: Stars,
    pub review: String,
}

impl NewReview {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a field is missing or `stars` is not 1-5.
    pub fn parse(
        name: Option<&str>,
        stars: Option<&str>,
        review: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required("name", name)?.to_string();
        let stars = required("stars", stars)?
            .parse::<i32>()
            .map_err(|e| ValidationError::invalid("stars", e))
            .and_then(|n| Stars::new(n).map_err(|e| ValidationError::invalid("stars", e)))?;
        let review = required("review", review)?.to_string();

        Ok(Self {
            name,
            stars,
            review,
        })
    }
}

/// A contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
}

impl NewMessage {
    /// Validate raw form values. `phone` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a required field is missing or the email is invalid.
    pub fn parse(
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        message: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required("name", name)?.to_string();
        let email = Email::parse(required("email", email)?)
            .map_err(|e| ValidationError::invalid("email", e))?;
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);
        let message = required("message", message)?.to_string();

        Ok(Self {
            name,
            email,
            phone,
            message,
        })
    }
}

/// A newsletter signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterSignup {
    pub email: Email,
}

impl NewsletterSignup {
    /// Validate the submitted email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the email is missing or invalid.
    pub fn parse(email: Option<&str>) -> Result<Self, ValidationError> {
        let email = Email::parse(required("email", email)?)
            .map_err(|e| ValidationError::invalid("email", e))?;
        Ok(Self { email })
    }
}

/// An order request.
///
/// The product id is not checked against the catalog; orders outlive products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl NewOrder {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a field is missing, non-numeric, or the
    /// quantity is not positive.
    pub fn parse(product_id: Option<&str>, quantity: Option<&str>) -> Result<Self, ValidationError> {
        let product_id = required("product_id", product_id)?
            .parse::<ProductId>()
            .map_err(|e| ValidationError::invalid("product_id", e))?;
        let quantity = required("quantity", quantity)?
            .parse::<i32>()
            .map_err(|e| ValidationError::invalid("quantity", e))?;
        if quantity <= 0 {
            return Err(ValidationError::invalid("quantity", "must be at least 1"));
        }

        Ok(Self {
            product_id,
            quantity,
        })
    }
}
