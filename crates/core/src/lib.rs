//! Domain rules for the Pitwall team management platform.
//!
//! Everything here is pure: enumerations, field rules, derived values and
//! aggregations. Persistence lives in `pitwall-db`, HTTP in `pitwall-api`.

pub mod access;
pub mod accounts;
pub mod analytics;
pub mod error;
pub mod events;
pub mod inventory;
pub mod lap_times;
pub mod roles;
pub mod setups;
pub mod types;
pub mod uploads;
pub mod validation;
pub mod vehicles;
