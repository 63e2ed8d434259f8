//! End-to-end tests for the shop API.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations and start the server
//! cargo run -p shop-cli -- migrate
//! cargo run -p shop-api
//!
//! # Run the ignored tests against it
//! cargo test -p shop-integration-tests -- --ignored
//! ```
//!
//! `SHOP_API_URL` selects the server (default: `http://localhost:3000`).

/// Base URL of the API under test.
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("SHOP_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// An email address no earlier run has registered.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@shop.test", uuid::Uuid::new_v4().simple())
}
