//! Declarative route-to-roles policy.
//!
//! Every request path is resolved against [`ROUTE_POLICIES`] to decide
//! whether it needs an identity and, if so, which roles may use it. Reads
//! (`GET`, `HEAD`, `OPTIONS`) and writes are governed separately so that
//! `viewer` stays read-only across every resource.
//!
//! Row-level ownership (setup sheets, uploads) is not expressed here; it
//! depends on the stored row and is checked by the handler.

use crate::roles::{ADMIN_ONLY, WRITE_ROLES};

/// Who may reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// Any valid token, whatever the role.
    Authenticated,
    /// A valid token whose role is in the list.
    Roles(&'static [&'static str]),
}

/// Policy for every path under `prefix` (matched on segment boundaries).
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub prefix: &'static str,
    pub read: Access,
    pub write: Access,
}

const fn policy(prefix: &'static str, read: Access, write: Access) -> RoutePolicy {
    RoutePolicy {
        prefix,
        read,
        write,
    }
}

/// Team resources: everyone signed in can read, only admins and users write.
const fn team_resource(prefix: &'static str) -> RoutePolicy {
    policy(prefix, Access::Authenticated, Access::Roles(WRITE_ROLES))
}

/// The policy table. The longest matching prefix wins.
pub const ROUTE_POLICIES: &[RoutePolicy] = &[
    policy("/health", Access::Public, Access::Public),
    policy("/api/auth/register", Access::Public, Access::Public),
    policy("/api/auth/login", Access::Public, Access::Public),
    policy("/api/auth", Access::Authenticated, Access::Authenticated),
    policy(
        "/api/admin",
        Access::Roles(ADMIN_ONLY),
        Access::Roles(ADMIN_ONLY),
    ),
    team_resource("/api/vehicles"),
    team_resource("/api/events"),
    team_resource("/api/drivers"),
    team_resource("/api/setups"),
    team_resource("/api/analytics"),
    team_resource("/api/parts"),
    team_resource("/api/uploads"),
];

/// Anything under `/api` that no rule names still needs a token.
const API_FALLBACK: Access = Access::Authenticated;

/// Whether an HTTP method only reads state.
pub fn is_read_method(method: &str) -> bool {
    matches!(method, "GET" | "HEAD" | "OPTIONS")
}

/// Resolve the access rule for a request.
pub fn resolve(method: &str, path: &str) -> Access {
    let best = ROUTE_POLICIES
        .iter()
        .filter(|p| prefix_matches(p.prefix, path))
        .max_by_key(|p| p.prefix.len());

    match best {
        Some(rule) if is_read_method(method) => rule.read,
        Some(rule) => rule.write,
        None if prefix_matches("/api", path) => API_FALLBACK,
        None => Access::Public,
    }
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
