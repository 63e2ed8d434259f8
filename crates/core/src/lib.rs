//! Shop Core - Shared types library.
//!
//! This crate provides the domain types used across the shop backend:
//! - `api` - HTTP service (catalog, admin gate, asset store, insert-only endpoints)
//! - `cli` - Command-line tools for migrations, admin creation and asset sweeps
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is available behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, monetary amounts and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
