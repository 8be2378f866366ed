use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Table
    pub table_path: PathBuf,

    // Language selection
    pub locale_override: Option<String>,
    pub load_from_system: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Table - authored JSON file with keys, languages and values
            table_path: std::env::var("TRANSLATION_TABLE")
                .context("TRANSLATION_TABLE not set")?
                .into(),

            // Language selection
            locale_override: std::env::var("APP_LOCALE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            load_from_system: std::env::var("LOAD_LANGUAGE_FROM_SYSTEM")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        })
    }
}

/// Parse common boolean spellings ("true", "1", "yes", "off", ...).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
