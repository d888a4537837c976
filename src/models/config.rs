//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable that overrides `cms.token`.
pub const TOKEN_ENV: &str = "SANITY_API_TOKEN";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Content store connection settings
    #[serde(default)]
    pub cms: CmsConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Query caching hints
    #[serde(default)]
    pub cache: CacheConfig,

    /// Site metadata and output settings
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            let mut config = Self::default();
            config.apply_env();
            config
        })
    }

    /// Pick up the API token from the environment when set.
    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.cms.token = Some(token);
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let ident = Regex::new(r"^[a-z0-9][a-z0-9_-]*$")
            .map_err(|e| AppError::config(e.to_string()))?;
        let api_version = Regex::new(r"^(1|\d{4}-\d{2}-\d{2})$")
            .map_err(|e| AppError::config(e.to_string()))?;

        if !ident.is_match(&self.cms.project_id) {
            return Err(AppError::validation(format!(
                "cms.project_id '{}' is not a valid project id",
                self.cms.project_id
            )));
        }
        if !ident.is_match(&self.cms.dataset) {
            return Err(AppError::validation(format!(
                "cms.dataset '{}' is not a valid dataset name",
                self.cms.dataset
            )));
        }
        if !api_version.is_match(&self.cms.api_version) {
            return Err(AppError::validation(
                "cms.api_version must be '1' or a YYYY-MM-DD date",
            ));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.site.featured_limit == 0 {
            return Err(AppError::validation("site.featured_limit must be > 0"));
        }
        if self.site.output_dir.trim().is_empty() {
            return Err(AppError::validation("site.output_dir is empty"));
        }
        Ok(())
    }
}

/// Connection settings for the Sanity query API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Sanity project identifier
    #[serde(default = "defaults::project_id")]
    pub project_id: String,

    /// Dataset name (e.g. "production")
    #[serde(default = "defaults::dataset")]
    pub dataset: String,

    /// API version, either "1" or a YYYY-MM-DD date
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Query the edge CDN instead of the live API
    #[serde(default = "defaults::use_cdn")]
    pub use_cdn: bool,

    /// Optional read token for private datasets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: defaults::project_id(),
            dataset: defaults::dataset(),
            api_version: defaults::api_version(),
            use_cdn: defaults::use_cdn(),
            token: None,
        }
    }
}

impl CmsConfig {
    /// Base URL of the query endpoint for this project and dataset.
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        format!(
            "https://{}.{}/v{}/data/query/{}",
            self.project_id, host, self.api_version, self.dataset
        )
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Query cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Disable to always hit the content store
    #[serde(default = "defaults::cache_enabled")]
    pub enabled: bool,

    /// Revalidation window for list and detail queries
    #[serde(default = "defaults::list_ttl")]
    pub list_ttl_secs: u64,

    /// Revalidation window for the category list
    #[serde(default = "defaults::categories_ttl")]
    pub categories_ttl_secs: u64,
}

impl CacheConfig {
    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }

    pub fn categories_ttl(&self) -> Duration {
        Duration::from_secs(self.categories_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::cache_enabled(),
            list_ttl_secs: defaults::list_ttl(),
            categories_ttl_secs: defaults::categories_ttl(),
        }
    }
}

/// Site metadata and build output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Title used in the page `<title>` suffix
    #[serde(default = "defaults::site_title")]
    pub title: String,

    /// Public base URL, used for canonical links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Directory the static build writes to
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Biography and work history file
    #[serde(default = "defaults::profile_file")]
    pub profile_file: String,

    /// Number of featured projects shown before "Show more"
    #[serde(default = "defaults::featured_limit")]
    pub featured_limit: usize,

    /// Number of articles listed on the home page
    #[serde(default = "defaults::latest_articles")]
    pub latest_articles: usize,

    /// Start in dark mode
    #[serde(default = "defaults::dark_theme")]
    pub dark_theme: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: defaults::site_title(),
            base_url: defaults::base_url(),
            output_dir: defaults::output_dir(),
            profile_file: defaults::profile_file(),
            featured_limit: defaults::featured_limit(),
            latest_articles: defaults::latest_articles(),
            dark_theme: defaults::dark_theme(),
        }
    }
}

mod defaults {
    // CMS defaults
    pub fn project_id() -> String {
        "portfolio".into()
    }
    pub fn dataset() -> String {
        "production".into()
    }
    pub fn api_version() -> String {
        "2024-01-01".into()
    }
    pub fn use_cdn() -> bool {
        true
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; portfolio/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }

    // Cache defaults
    pub fn cache_enabled() -> bool {
        true
    }
    pub fn list_ttl() -> u64 {
        3600
    }
    pub fn categories_ttl() -> u64 {
        7200
    }

    // Site defaults
    pub fn site_title() -> String {
        "Portfolio".into()
    }
    pub fn base_url() -> String {
        "http://localhost:3000".into()
    }
    pub fn output_dir() -> String {
        "public".into()
    }
    pub fn profile_file() -> String {
        "data/profile.toml".into()
    }
    pub fn featured_limit() -> usize {
        3
    }
    pub fn latest_articles() -> usize {
        4
    }
    pub fn dark_theme() -> bool {
        true
    }
}
