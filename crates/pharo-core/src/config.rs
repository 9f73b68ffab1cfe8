use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TAGS_URL: &str = "https://s3.amazonaws.com/pharo-mattermost/tags.json";
pub const DEFAULT_SETTINGS_URL: &str = "https://s3.amazonaws.com/pharo-mattermost/settings.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_SUBJECT_WORDS: usize = 5;
/// Channels with more members than this ask before notifying everyone.
pub const DEFAULT_NOTIFY_ALL_THRESHOLD: usize = 5;

/// Top-level config (pharo.toml + PHARO_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PharoConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub drafts: DraftsConfig,
}

/// Where the tag vocabulary and client settings are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_tags_url")]
    pub tags_url: String,
    #[serde(default = "default_settings_url")]
    pub settings_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tags_url: default_tags_url(),
            settings_url: default_settings_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Message composition policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Position substrings (case-insensitive) that may skip the structured fields.
    #[serde(default = "default_exempt_positions")]
    pub exempt_positions: Vec<String>,
    /// Words taken from the message when a subject has to be generated.
    #[serde(default = "default_subject_words")]
    pub subject_words: usize,
    /// Ask for confirmation before `@channel`/`@all` in large channels.
    #[serde(default = "bool_true")]
    pub confirm_notify_all: bool,
    #[serde(default = "default_notify_all_threshold")]
    pub notify_all_threshold: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            exempt_positions: default_exempt_positions(),
            subject_words: default_subject_words(),
            confirm_notify_all: true,
            notify_all_threshold: default_notify_all_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftsConfig {
    #[serde(default = "default_drafts_path")]
    pub path: String,
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            path: default_drafts_path(),
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_tags_url() -> String {
    DEFAULT_TAGS_URL.to_string()
}
fn default_settings_url() -> String {
    DEFAULT_SETTINGS_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}
fn default_exempt_positions() -> Vec<String> {
    vec!["portfolio".to_string(), "managing partner".to_string()]
}
fn default_subject_words() -> usize {
    DEFAULT_SUBJECT_WORDS
}
fn default_notify_all_threshold() -> usize {
    DEFAULT_NOTIFY_ALL_THRESHOLD
}
fn default_drafts_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.pharo/drafts.db", home)
}

impl PharoConfig {
    /// Load config from a TOML file with PHARO_* env var overrides.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `PHARO_COMPOSER__SUBJECT_WORDS=8`. A missing file yields defaults.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: PharoConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PHARO_").split("__"))
            .extract()
            .map_err(|e| crate::error::PharoError::Config(e.to_string()))?;

        tracing::debug!(path = %path, "configuration loaded");
        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.pharo/pharo.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = PharoConfig::load(Some("/nonexistent/pharo.toml")).unwrap();
        assert_eq!(config.catalog.tags_url, DEFAULT_TAGS_URL);
        assert_eq!(config.composer.subject_words, 5);
        assert!(config.composer.confirm_notify_all);
        assert_eq!(
            config.composer.exempt_positions,
            vec!["portfolio".to_string(), "managing partner".to_string()]
        );
    }

    #[test]
    fn file_overrides_selected_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[catalog]\ntags_url = \"http://localhost:9000/tags.json\"\n\n[composer]\nsubject_words = 8\n"
        )
        .unwrap();

        let config = PharoConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.catalog.tags_url, "http://localhost:9000/tags.json");
        assert_eq!(config.catalog.settings_url, DEFAULT_SETTINGS_URL);
        assert_eq!(config.composer.subject_words, 8);
        assert_eq!(config.composer.notify_all_threshold, 5);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[composer]\nsubject_words = \"many\"").unwrap();

        let err = PharoConfig::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
