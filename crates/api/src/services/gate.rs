//! Admin capability check for product mutations.
//!
//! The client claims an admin id (the `x-admin-id` header) and the gate
//! confirms that an admin with that id exists. There is no secret involved:
//! anyone who learns or guesses an id passes. The check is kept behind
//! [`AdminAuthGate::verify`] so a real credential (signed token, session) can
//! replace the header without touching the catalog.

use std::sync::Arc;

use thiserror::Error;

use shop_core::AdminId;

use crate::db::{AdminStore, RepositoryError};

/// Why a claimed admin identity was not accepted.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// No identifier was supplied.
    #[error("admin credential is missing")]
    MissingCredential,

    /// The identifier does not belong to any admin.
    #[error("not authorized as admin")]
    Unauthorized,

    /// The admin lookup itself failed; no decision was made.
    #[error("admin lookup failed: {0}")]
    Lookup(#[from] RepositoryError),
}

/// A verified admin, threaded into every product mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminContext {
    pub admin_id: AdminId,
}

/// Verifies claimed admin identifiers against the admin store.
#[derive(Clone)]
pub struct AdminAuthGate {
    admins: Arc<dyn AdminStore>,
}

impl AdminAuthGate {
    #[must_use]
    pub fn new(admins: Arc<dyn AdminStore>) -> Self {
        Self { admins }
    }

    /// Verify a claimed admin id.
    ///
    /// Blank values count as missing. Values that are not numeric cannot
    /// name an admin and are rejected as unauthorized.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` or `Unauthorized` on rejection, `Lookup`
    /// if the store could not be queried.
    pub async fn verify(&self, claimed: Option<&str>) -> Result<AdminContext, AuthenticationError> {
        let claimed = claimed
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthenticationError::MissingCredential)?;

        let Ok(admin_id) = claimed.parse::<AdminId>() else {
            tracing::warn!(claimed = %claimed, "Rejected non-numeric admin id");
            return Err(AuthenticationError::Unauthorized);
        };

        match self.admins.find_admin(admin_id).await? {
            Some(admin) => Ok(AdminContext {
                admin_id: admin.admin_id,
            }),
            None => {
                tracing::warn!(admin_id = %admin_id, "Rejected unknown admin id");
                Err(AuthenticationError::Unauthorized)
            }
        }
    }
}

impl std::fmt::Debug for AdminAuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthGate").finish_non_exhaustive()
    }
}
