//! Core types for the shop backend.

pub mod amount;
pub mod email;
pub mod id;
pub mod rating;

pub use amount::{Amount, AmountError};
pub use email::{Email, EmailError};
pub use id::*;
pub use rating::{Stars, StarsError};
