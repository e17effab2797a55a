pub mod analysis;
pub mod auth;
pub mod dashboard;
pub mod geo;
pub mod reports;
pub mod uploads;
pub mod weather;
