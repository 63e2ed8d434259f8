//! Admin account management.

use shop_api::services::AccountService;

use super::{CommandError, connect};

/// Create an admin account with a hashed password.
///
/// The returned id is what clients send in `x-admin-id`.
pub async fn create(name: &str, email: &str, password: &str) -> Result<i32, CommandError> {
    let (_, pool) = connect().await?;

    let admin = AccountService::new(&pool)
        .register(name, email, password)
        .await?;

    tracing::info!(
        "Admin created successfully! ID: {}, Email: {}",
        admin.admin_id,
        admin.email
    );
    Ok(admin.admin_id.as_i32())
}
