// src/client/mod.rs
mod fetcher;

pub use fetcher::{FetchError, Fetcher, HttpFetcher};
