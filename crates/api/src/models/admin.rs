//! Admin domain types.

use serde::Serialize;

use shop_core::{AdminId, Email};

/// An admin account (domain type).
///
/// The password hash never leaves the database layer, so it is not a field
/// here and cannot be serialized into a response by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admin {
    /// Unique admin ID.
    pub admin_id: AdminId,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: Email,
}
