//! Business logic services.

pub mod assets;
pub mod auth;
pub mod catalog;
pub mod gate;

pub use assets::{AssetError, AssetStore};
pub use auth::{AccountError, AccountService};
pub use catalog::{CatalogError, ImageChange, ImageUpload, ProductCatalog, SweepReport};
pub use gate::{AdminAuthGate, AdminContext, AuthenticationError};
