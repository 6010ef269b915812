use certkit_binding::{ResolverOptions, DEFAULT_DATE_PATTERN, DEFAULT_LOCALE};
use certkit_editor::{EditorConfig, DEFAULT_HISTORY_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "certkit.config.json";

/// Certkit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory holding `<template-id>.json` files
    pub templates_dir: String,

    /// Output directory for issued certificates
    pub out_dir: String,

    /// Locale used for dates and numbers
    pub locale: String,

    /// Date pattern for bindings without their own
    pub date_pattern: String,

    pub history_limit: usize,

    pub min_element_size: f64,
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn templates_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.templates_dir)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            locale: self.locale.clone(),
            date_pattern: self.date_pattern.clone(),
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
            min_element_size: self.min_element_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            out_dir: "issued".to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            min_element_size: EditorConfig::default().min_element_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "templatesDir": "designs",
            "outDir": "dist",
            "locale": "en-GB",
            "datePattern": "d MMM yyyy"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.templates_dir, "designs");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.resolver_options().locale, "en-GB");
        assert_eq!(config.resolver_options().date_pattern, "d MMM yyyy");
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.templates_dir, "templates");
        assert_eq!(config.out_dir, "issued");
        assert_eq!(config.locale, "en");
        assert_eq!(config.date_pattern, "dd MMMM yyyy");
        assert_eq!(config.editor_config(), EditorConfig::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}
