// src/config/ini_file.rs
// Sectioned key/value files: one `[section]` per site, `[DEFAULT]` holds
// fallbacks shared by every site.
use super::models::SiteSection;
use ini::{Ini, ParseOption, Properties};
use std::collections::HashSet;

pub(crate) const DEFAULT_SECTION: &str = "DEFAULT";

pub(crate) fn parse_sections(contents: &str) -> Result<Vec<(String, SiteSection)>, String> {
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    let document = Ini::load_from_str_opt(contents, options).map_err(|e| e.to_string())?;

    let mut defaults = SiteSection::default();
    let mut seen = HashSet::new();
    let mut sections = Vec::new();

    for (name, properties) in document.iter() {
        let name = match name {
            Some(name) => name.trim(),
            None if properties.iter().next().is_none() => continue,
            None => return Err("file contains keys outside of any [section]".to_string()),
        };

        if !seen.insert(name.to_string()) {
            return Err(format!("section [{name}] appears more than once"));
        }

        let section = read_section(name, properties)?;
        if name == DEFAULT_SECTION {
            defaults = section;
        } else {
            sections.push((name.to_string(), section));
        }
    }

    Ok(sections
        .into_iter()
        .map(|(name, section)| (name, section.with_defaults(&defaults)))
        .collect())
}

fn read_section(name: &str, properties: &Properties) -> Result<SiteSection, String> {
    let mut section = SiteSection::default();

    for (key, value) in properties.iter() {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "url" => section.url = Some(value.to_string()),
            "timeout" => section.timeout = Some(parse_int(name, "Timeout", value)?),
            "expected" => section.expected = Some(parse_int(name, "Expected", value)?),
            other => tracing::debug!(section = name, key = other, "ignoring unknown key"),
        }
    }

    Ok(section)
}

fn parse_int(section: &str, key: &str, value: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("site {section}: {key} must be an integer, got {value:?}"))
}
