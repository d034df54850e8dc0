// src/report/formatter.rs
use super::json::to_spaced_string;
use crate::error::Result;
use crate::health::ResultSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Plain,
    Simple,
    Json,
}

/// Render a finished run. `single` is the site name when the run was
/// restricted to one site.
pub fn render(results: &ResultSet, mode: OutputMode, single: Option<&str>) -> Result<String> {
    let text = match (mode, single) {
        (OutputMode::Json, _) => to_spaced_string(results)?,
        (OutputMode::Plain | OutputMode::Simple, Some(name)) => single_site(results, name),
        (OutputMode::Simple, None) => format!(
            "{} sites were up. {} sites were unreachable.",
            results.alive.len(),
            results.dead.len()
        ),
        (OutputMode::Plain, None) => format!(
            "sites that were alive: {}. sites that were dead: {}.",
            quoted_list(&results.alive),
            quoted_list(&results.dead)
        ),
    };

    Ok(text)
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
}

pub fn render_error(message: &str, mode: OutputMode) -> String {
    let plain = || format!("[!] Error: {message}");

    match mode {
        OutputMode::Json => to_spaced_string(&ErrorReport { error: message }).unwrap_or_else(|_| plain()),
        OutputMode::Plain | OutputMode::Simple => plain(),
    }
}

fn single_site(results: &ResultSet, name: &str) -> String {
    let status = if results.is_alive(name) { "alive" } else { "dead" };
    format!("{name} was {status}.")
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
