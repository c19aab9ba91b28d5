//! Configuration types for the ResourceHub host.
//!
//! The file is TOML with every section optional. API credentials can also be
//! supplied through environment variables, which take precedence over the
//! file.

use hub_search::{Category, CategoryLimits, EnabledCategories, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HubError, Result};

/// Env var overriding [`CredentialsConfig::google_api_key`].
pub const ENV_GOOGLE_API_KEY: &str = "RESOURCEHUB_GOOGLE_API_KEY";
/// Env var overriding [`CredentialsConfig::google_cx`].
pub const ENV_GOOGLE_CX: &str = "RESOURCEHUB_GOOGLE_CX";
/// Env var overriding [`CredentialsConfig::youtube_api_key`].
pub const ENV_YOUTUBE_API_KEY: &str = "RESOURCEHUB_YOUTUBE_API_KEY";
/// Env var overriding [`CredentialsConfig::github_token`].
pub const ENV_GITHUB_TOKEN: &str = "RESOURCEHUB_GITHUB_TOKEN";

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Search behaviour.
    pub search: SearchSection,
    /// API credentials.
    pub credentials: CredentialsConfig,
    /// API base URLs.
    pub endpoints: EndpointsConfig,
    /// Usage ledger settings.
    pub usage: UsageConfig,
}

/// Search behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Results per category, clamped to 1..=10.
    pub limit: usize,
    /// Per-source request timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent with every request (None = built-in default).
    pub user_agent: Option<String>,
    /// Categories searched when the command line does not say otherwise.
    pub categories: Vec<Category>,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            limit: 5,
            timeout_seconds: 8,
            user_agent: None,
            categories: Category::all().to_vec(),
        }
    }
}

/// API credentials. Absent keys leave the matching category empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Google Custom Search API key.
    pub google_api_key: Option<String>,
    /// Google Custom Search engine id.
    pub google_cx: Option<String>,
    /// YouTube Data API key.
    pub youtube_api_key: Option<String>,
    /// GitHub token (optional; raises the rate limit).
    pub github_token: Option<String>,
}

/// API base URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Repository search API.
    pub github: String,
    /// Web search API.
    pub google: String,
    /// Video search API.
    pub youtube: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            github: hub_search::config::GITHUB_API_BASE.into(),
            google: hub_search::config::GOOGLE_API_BASE.into(),
            youtube: hub_search::config::YOUTUBE_API_BASE.into(),
        }
    }
}

/// Usage ledger settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// External API requests allowed per 24-hour window.
    pub daily_budget: u64,
    /// Where the ledger is stored (None = platform data dir).
    pub ledger_path: Option<PathBuf>,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            daily_budget: 100,
            ledger_path: None,
        }
    }
}

impl HubConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| HubError::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| HubError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::hub_dirs::config_file()
    }

    /// Overlay credentials from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overlay credentials from any key lookup. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let creds = &mut self.credentials;
        for (key, slot) in [
            (ENV_GOOGLE_API_KEY, &mut creds.google_api_key),
            (ENV_GOOGLE_CX, &mut creds.google_cx),
            (ENV_YOUTUBE_API_KEY, &mut creds.youtube_api_key),
            (ENV_GITHUB_TOKEN, &mut creds.github_token),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }
    }

    /// The categories enabled by default.
    pub fn enabled_categories(&self) -> EnabledCategories {
        EnabledCategories::only(&self.search.categories)
    }

    /// Per-category limits derived from `search.limit`.
    pub fn limits(&self) -> CategoryLimits {
        CategoryLimits::uniform(self.search.limit)
    }

    /// Build and validate the search core's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Search`] if the resulting [`SearchConfig`] is invalid.
    pub fn to_search_config(&self) -> Result<SearchConfig> {
        let defaults = SearchConfig::default();
        let config = SearchConfig {
            timeout_seconds: self.search.timeout_seconds,
            user_agent: self
                .search
                .user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
            github_token: self.credentials.github_token.clone(),
            google_api_key: self.credentials.google_api_key.clone(),
            google_cx: self.credentials.google_cx.clone(),
            youtube_api_key: self.credentials.youtube_api_key.clone(),
            github_api_base: self.endpoints.github.clone(),
            google_api_base: self.endpoints.google.clone(),
            youtube_api_base: self.endpoints.youtube.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Where the usage ledger lives.
    pub fn ledger_path(&self) -> PathBuf {
        self.usage
            .ledger_path
            .clone()
            .unwrap_or_else(crate::hub_dirs::usage_file)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HubConfig::default();
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.search.categories.len(), 3);
        assert!(config.to_search_config().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: HubConfig = toml::from_str(
            r#"
            [search]
            limit = 3
            categories = ["video", "repo"]

            [credentials]
            youtube_api_key = "yt"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.limit, 3);
        assert_eq!(config.search.timeout_seconds, 8);
        assert_eq!(config.credentials.youtube_api_key.as_deref(), Some("yt"));
        assert!(config.credentials.google_api_key.is_none());
        let enabled = config.enabled_categories();
        assert!(enabled.contains(Category::Video));
        assert!(!enabled.contains(Category::Article));
        assert_eq!(config.usage.daily_budget, 100);
    }

    #[test]
    fn limit_is_clamped_into_range() {
        let mut config = HubConfig::default();
        config.search.limit = 50;
        assert_eq!(config.limits().get(Category::Repo), 10);
        config.search.limit = 0;
        assert_eq!(config.limits().get(Category::Video), 1);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = HubConfig::default();
        config.credentials.google_cx = Some("cx-123".into());
        config.search.categories = vec![Category::Article];
        config.save_to_file(&path).unwrap();

        let loaded = HubConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = HubConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_or_default_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = HubConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();
        let err = HubConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, HubError::Config(_)));
    }

    #[test]
    fn overrides_replace_credentials_and_skip_blank() {
        let mut config = HubConfig::default();
        config.credentials.github_token = Some("from-file".into());
        config.apply_overrides(|key| match key {
            ENV_GOOGLE_API_KEY => Some("env-key".into()),
            ENV_GITHUB_TOKEN => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.credentials.google_api_key.as_deref(), Some("env-key"));
        assert_eq!(config.credentials.github_token.as_deref(), Some("from-file"));
        assert!(config.credentials.youtube_api_key.is_none());
    }

    #[test]
    fn search_config_carries_credentials_and_endpoints() {
        let mut config = HubConfig::default();
        config.credentials.youtube_api_key = Some("yt".into());
        config.endpoints.github = "http://localhost:1234".into();
        config.search.user_agent = Some("TestAgent/1.0".into());
        let search = config.to_search_config().unwrap();
        assert_eq!(search.youtube_api_key.as_deref(), Some("yt"));
        assert_eq!(search.github_api_base, "http://localhost:1234");
        assert_eq!(search.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = HubConfig::default();
        config.search.timeout_seconds = 0;
        let err = config.to_search_config().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn ledger_path_override() {
        let mut config = HubConfig::default();
        config.usage.ledger_path = Some(PathBuf::from("/tmp/x/usage.json"));
        assert_eq!(config.ledger_path(), PathBuf::from("/tmp/x/usage.json"));
    }
}
