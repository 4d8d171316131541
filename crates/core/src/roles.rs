//! Well-known role name constants and role rules.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::check_one_of;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_VIEWER: &str = "viewer";

/// Accepted role values, in declared order.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER, ROLE_VIEWER];

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Roles allowed to mutate team data. `viewer` is read-only everywhere.
pub const WRITE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Roles allowed to manage other users.
pub const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];

pub fn check_role(role: &str) -> Result<(), CoreError> {
    check_one_of("role", role, VALID_ROLES)
}

/// Reject an administrative action an admin attempts on their own account.
///
/// `action` completes the sentence "You cannot change your own ...".
pub fn ensure_not_self(target_id: DbId, caller_id: DbId, action: &str) -> Result<(), CoreError> {
    if target_id == caller_id {
        Err(CoreError::Validation(format!(
            "You cannot change your own {action}."
        )))
    } else {
        Ok(())
    }
}

/// Whether `role` appears in `allowed`.
pub fn role_allowed(role: &str, allowed: &[&str]) -> bool {
    allowed.contains(&role)
}

/// Resource owners and admins may modify a row; everyone else may not.
pub fn can_modify(owner_id: DbId, caller_id: DbId, caller_role: &str) -> bool {
    owner_id == caller_id || caller_role == ROLE_ADMIN
}
