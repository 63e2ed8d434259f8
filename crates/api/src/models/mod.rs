//! Domain models for the shop API.

pub mod admin;
pub mod product;
pub mod storefront;
pub mod validation;

pub use admin::Admin;
pub use product::{Product, ProductDetails};
pub use storefront::{NewMessage, NewOrder, NewReview, NewsletterSignup, Review};
pub use validation::ValidationError;
