pub mod admin;
pub mod analytics;
pub mod auth;
pub mod driver;
pub mod event;
pub mod part;
pub mod setup;
pub mod upload;
pub mod vehicle;
pub mod weather;
