// src/report/mod.rs
mod formatter;
mod json;

pub use formatter::{render, render_error, OutputMode};
