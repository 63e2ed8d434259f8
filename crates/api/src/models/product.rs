//! Product domain types.

use serde::Serialize;

use shop_core::{Amount, ProductId};

use super::validation::{ValidationError, required};

/// A catalog entry as returned by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Generated asset filename under `/uploads`.
    pub image: String,
    /// Price.
    pub price: Amount,
    /// Discount, stored as given.
    pub discount: Amount,
}

/// The client-editable fields of a product, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: String,
    pub price: Amount,
    pub discount: Amount,
}

impl ProductDetails {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first missing or malformed field.
    pub fn parse(
        name: Option<&str>,
        price: Option<&str>,
        discount: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = required("name", name)?.to_string();
        let price = Amount::parse(required("price", price)?)
            .map_err(|e| ValidationError::invalid("price", e))?;
        let discount = Amount::parse(required("discount", discount)?)
            .map_err(|e| ValidationError::invalid("discount", e))?;

        Ok(Self {
            name,
            price,
            discount,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let details = ProductDetails::parse(Some(" Shirt "), Some("10"), Some("0")).unwrap();
        assert_eq!(details.name, "Shirt");
        assert_eq!(details.price, Amount::parse("10").unwrap());
        assert_eq!(details.discount, Amount::ZERO);
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(
            ProductDetails::parse(None, Some("10"), Some("0")),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            ProductDetails::parse(Some("Shirt"), Some(""), Some("0")),
            Err(ValidationError::MissingField("price"))
        );
        assert_eq!(
            ProductDetails::parse(Some("Shirt"), Some("10"), None),
            Err(ValidationError::MissingField("discount"))
        );
    }

    #[test]
    fn test_parse_malformed_amount() {
        let err = ProductDetails::parse(Some("Shirt"), Some("-3"), Some("0")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "price", .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let product = Product {
            product_id: ProductId::new(1),
            name: "Shirt".to_string(),
            image: "1700000000000-a.png".to_string(),
            price: Amount::parse("10.00").unwrap(),
            discount: Amount::ZERO,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["product_id"], 1);
        assert_eq!(json["image"], "1700000000000-a.png");
        assert_eq!(json["price"], "10.00");
    }
}
