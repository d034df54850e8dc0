// src/config/mod.rs
mod ini_file;
mod models;

pub use models::SiteSpec;

use crate::error::{Error, Result};
use models::SiteSection;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// YAML and JSON are picked by extension; everything else is read as INI.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Ini,
        }
    }
}

/// Load the site list from a file, keeping the order the sites are written in.
pub async fn load_sites<P: AsRef<Path>>(path: P) -> Result<Vec<SiteSpec>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::config_load(path, e))?;

    let sites = parse_sites(&contents, ConfigFormat::from_path(path))
        .map_err(|reason| Error::config_load(path, reason))?;

    tracing::info!("Loaded {} sites from {}", sites.len(), path.display());
    Ok(sites)
}

pub fn parse_sites(contents: &str, format: ConfigFormat) -> Result<Vec<SiteSpec>, String> {
    let sections = match format {
        ConfigFormat::Ini => ini_file::parse_sections(contents)?,
        ConfigFormat::Yaml => yaml_sections(contents)?,
        ConfigFormat::Json => json_sections(contents)?,
    };

    sections
        .into_iter()
        .map(|(name, section)| section.into_spec(name))
        .collect()
}

fn yaml_sections(contents: &str) -> Result<Vec<(String, SiteSection)>, String> {
    let mapping: Option<serde_yaml::Mapping> =
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse YAML config: {e}"))?;

    mapping
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| -> Result<(String, SiteSection), String> {
            let name = key
                .as_str()
                .ok_or_else(|| format!("site names must be strings, got {key:?}"))?
                .to_string();
            let section = serde_yaml::from_value(value)
                .map_err(|e| format!("site {name}: {e}"))?;
            Ok((name, section))
        })
        .collect()
}

fn json_sections(contents: &str) -> Result<Vec<(String, SiteSection)>, String> {
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON config: {e}"))?;

    object
        .into_iter()
        .map(|(name, value)| -> Result<(String, SiteSection), String> {
            let section = serde_json::from_value(value)
                .map_err(|e| format!("site {name}: {e}"))?;
            Ok((name, section))
        })
        .collect()
}
