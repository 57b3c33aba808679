//! `AppConfig` struct, TOML loading and environment overrides.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use moviedeck_api::locale::{DEFAULT_LOCALE, LocaleResolver};
use moviedeck_api::movies::{DetailLimits, PageSizes};
use moviedeck_api::tmdb::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `tmdb.api_key`.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "PORT";

/// Shown instead of the API key by `config show`.
const REDACTED: &str = "<redacted>";

/// Top-level application configuration.
///
/// Every section and field is optional in the file; missing values take
/// their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Page sizes.
    #[serde(default)]
    pub paging: PagingConfig,
    /// Detail collection caps.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Language code to TMDB locale table.
    #[serde(default)]
    pub locale: LocaleConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3001,
        }
    }
}

/// TMDB connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API v3 base URL.
    pub base_url: String,
    /// API key; requests fail with a configuration error while unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Page sizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagingConfig {
    /// Movies per application page.
    pub page_size: u32,
    /// Movies per TMDB list page.
    pub upstream_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        let sizes = PageSizes::default();
        Self {
            page_size: sizes.page_size(),
            upstream_page_size: sizes.upstream_page_size(),
        }
    }
}

/// Detail collection caps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum reviews.
    pub reviews: usize,
    /// Maximum backdrops.
    pub backdrops: usize,
    /// Maximum posters.
    pub posters: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = DetailLimits::default();
        Self {
            reviews: limits.reviews,
            backdrops: limits.backdrops,
            posters: limits.posters,
        }
    }
}

/// Language code to TMDB locale table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale for unknown codes and overview fallback.
    pub default: String,
    /// Application code -> TMDB locale tag.
    pub map: BTreeMap<String, String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: String::from(DEFAULT_LOCALE),
            map: [("en", "en-US"), ("et", "en-US"), ("ru", "ru-RU")]
                .into_iter()
                .map(|(code, tag)| (String::from(code), String::from(tag)))
                .collect(),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Loads the file, applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, an override is malformed, or a
    /// value is out of range.
    pub fn load_effective(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `TMDB_API_KEY` and `PORT` overrides from `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port number.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = present(ENV_API_KEY) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(port) = present(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_PORT} value: {port}"))?;
        }
        Ok(())
    }

    /// Checks ranges and the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if a page size or the timeout is 0, or the base
    /// URL does not parse.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.paging.page_size > 0, "paging.page_size must be > 0");
        ensure!(
            self.paging.upstream_page_size > 0,
            "paging.upstream_page_size must be > 0"
        );
        ensure!(self.tmdb.timeout_secs > 0, "tmdb.timeout_secs must be > 0");
        self.base_url()?;
        Ok(())
    }

    /// TMDB base URL with a trailing `/`, so endpoint paths join under it.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is not an absolute URL.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.tmdb.base_url.trim();
        let mut url = Url::parse(raw).with_context(|| format!("invalid tmdb.base_url: {raw}"))?;
        if url.cannot_be_a_base() {
            bail!("invalid tmdb.base_url: {raw}");
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Configured API key, if any.
    pub fn api_key(&self) -> Option<String> {
        self.tmdb
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
    }

    /// Per-request TMDB timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb.timeout_secs)
    }

    /// Page sizes.
    ///
    /// # Errors
    ///
    /// Returns an error if either size is 0.
    pub fn page_sizes(&self) -> Result<PageSizes> {
        PageSizes::new(self.paging.page_size, self.paging.upstream_page_size)
            .context("page sizes must be > 0")
    }

    /// Detail collection caps.
    pub const fn detail_limits(&self) -> DetailLimits {
        DetailLimits {
            reviews: self.limits.reviews,
            backdrops: self.limits.backdrops,
            posters: self.limits.posters,
        }
    }

    /// Locale table.
    pub fn locale_resolver(&self) -> LocaleResolver {
        LocaleResolver::new(self.locale.map.clone(), self.locale.default.clone())
    }

    /// Copy safe to print, with the API key masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.tmdb.api_key.is_some() {
            config.tmdb.api_key = Some(String::from(REDACTED));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.tmdb.timeout_secs, 10);
        assert_eq!(config.paging.page_size, 10);
        assert_eq!(config.paging.upstream_page_size, 20);
        assert_eq!(config.limits.reviews, 5);
        assert_eq!(config.locale.map.get("et").map(String::as_str), Some("en-US"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_sections_fill_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[paging]\npage_size = 15\n\n[locale.map]\nde = \"de-DE\"\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.paging.page_size, 15);
        assert_eq!(config.paging.upstream_page_size, 20);
        assert_eq!(config.locale.default, "en-US");
        assert_eq!(config.locale.map.len(), 1);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_is_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        // Arrange
        let mut config = AppConfig::default();

        // Act
        config
            .apply_env(|key| match key {
                ENV_API_KEY => Some(String::from("secret")),
                ENV_PORT => Some(String::from("4000")),
                _ => None,
            })
            .unwrap();

        // Assert
        assert_eq!(config.api_key().as_deref(), Some("secret"));
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("from-file"));

        // Act
        config.apply_env(|_| Some(String::from("  "))).unwrap();

        // Assert
        assert_eq!(config.api_key().as_deref(), Some("from-file"));
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn test_invalid_port_override_is_error() {
        // Arrange
        let mut config = AppConfig::default();

        // Act
        let result = config.apply_env(|key| (key == ENV_PORT).then(|| String::from("99999")));

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        // Arrange
        let mut zero_page = AppConfig::default();
        zero_page.paging.page_size = 0;
        let mut zero_timeout = AppConfig::default();
        zero_timeout.tmdb.timeout_secs = 0;

        // Act & Assert
        assert!(zero_page.validate().is_err());
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.base_url = String::from("http://127.0.0.1:9000/3");

        // Act
        let url = config.base_url().unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/3/");
        assert_eq!(url.join("movie/550").unwrap().path(), "/3/movie/550");
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.base_url = String::from("not a url");

        // Act & Assert
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_api_key() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("secret"));

        // Act
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();

        // Assert
        assert!(!shown.contains("secret"));
        assert!(shown.contains(REDACTED));
    }

    #[test]
    fn test_locale_resolver_uses_table() {
        // Arrange
        let mut config = AppConfig::default();
        config.locale.map.insert(String::from("de"), String::from("de-DE"));

        // Act
        let resolver = config.locale_resolver();

        // Assert
        assert_eq!(resolver.resolve(Some("de")).as_str(), "de-DE");
        assert_eq!(resolver.resolve(Some("ru")).as_str(), "ru-RU");
        assert_eq!(resolver.resolve(Some("fr")).as_str(), "en-US");
    }
}
