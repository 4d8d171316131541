//! Domain model structs and request schemas.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize + Validate` create schema for inserts
//! - A `Deserialize + Validate` update schema (all `Option` fields) for patches
//!
//! Request schemas reject unknown fields and report enumeration and
//! cross-field failures through a struct-level `schema` rule.

use serde::{Deserialize, Deserializer};

pub mod driver;
pub mod event;
pub mod lap_time;
pub mod part;
pub mod setup_sheet;
pub mod upload;
pub mod user;
pub mod vehicle;

/// Distinguish an explicit `null` from an absent field in patch bodies.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: absent → `None`, `null` → `Some(None)`.
pub(crate) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
