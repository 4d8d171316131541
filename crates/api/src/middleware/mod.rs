//! Authentication and authorization middleware.
//!
//! - [`auth::AuthUser`] -- the caller's identity, decoded from a Bearer token.
//! - [`policy::enforce_route_policy`] -- applies the route policy table to
//!   every request before it reaches a handler.

pub mod auth;
pub mod policy;
