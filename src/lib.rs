// src/lib.rs
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod printer;
pub mod report;

pub use error::{Error, Result};
