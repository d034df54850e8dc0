// src/health/mod.rs
mod checker;
mod status;

pub use checker::{select_sites, HealthChecker, TransportPolicy};
pub use status::{CheckOutcome, ResultSet, SiteStatus};
