//! First-admin provisioning at startup.

use anyhow::Context;
use pitwall_core::accounts::normalize_email;
use pitwall_core::roles::ROLE_ADMIN;
use pitwall_db::models::user::CreateUser;
use pitwall_db::repositories::UserRepo;
use pitwall_db::DbPool;

use crate::auth::password::{check_password_strength, hash_password};
use crate::config::BootstrapAdmin;

/// Make sure at least one active admin exists.
///
/// Does nothing when an admin is already present. If the configured email
/// belongs to an existing account, that account is promoted; otherwise a
/// new admin is created with the configured password.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    if UserRepo::exists_with_role(pool, ROLE_ADMIN)
        .await
        .context("Failed to look up existing admins")?
    {
        tracing::debug!("Admin account already present, skipping bootstrap");
        return Ok(());
    }

    let email = normalize_email(&admin.email);

    if let Some(existing) = UserRepo::find_by_email(pool, &email)
        .await
        .context("Failed to look up bootstrap admin email")?
    {
        UserRepo::update_role(pool, existing.id, ROLE_ADMIN)
            .await
            .context("Failed to promote bootstrap admin")?;
        UserRepo::set_active(pool, existing.id, true)
            .await
            .context("Failed to activate bootstrap admin")?;
        tracing::info!(user_id = %existing.id, email = %email, "Promoted existing user to admin");
        return Ok(());
    }

    check_password_strength(&admin.password).context("BOOTSTRAP_ADMIN_PASSWORD is too weak")?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap admin password: {e}"))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.clone(),
            password_hash,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .context("Failed to create bootstrap admin")?;

    tracing::info!(user_id = %user.id, email = %email, "Bootstrap admin created");
    Ok(())
}
