//! Build-mode selection, API endpoints and process configuration.

use std::time::Duration;

use serde::Deserialize;
use strum::{Display, EnumString};
use url::Url;

use crate::error::ConfigError;

/// Backend base URL used by development builds.
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000";

/// Backend base URL used by production builds.
pub const PRODUCTION_BASE_URL: &str = "https://api.flashbricks.com";

/// Path of the backend health endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "/api/health/";

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Which kind of build is running.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Local development build, talks to a backend on localhost.
    #[strum(to_string = "development", serialize = "dev")]
    #[serde(alias = "dev")]
    #[default]
    Development,
    /// Release build, talks to the hosted backend.
    #[strum(to_string = "production", serialize = "prod")]
    #[serde(alias = "prod")]
    Production,
}

impl BuildMode {
    /// Build mode of the running binary: debug builds are development builds.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    /// Base URL for this build mode.
    pub fn base_url(&self) -> &'static str {
        match self {
            BuildMode::Development => DEVELOPMENT_BASE_URL,
            BuildMode::Production => PRODUCTION_BASE_URL,
        }
    }
}

/// Resolved backend endpoints. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
    health: String,
}

impl ApiEndpoints {
    /// Endpoints for one of the two hardcoded backends.
    pub fn for_mode(mode: BuildMode) -> Self {
        Self::from_trusted(mode.base_url())
    }

    /// Endpoints rooted at an arbitrary base URL (tests, local tooling).
    ///
    /// The base must be an absolute `http` or `https` URL made of scheme,
    /// host and optional port only. A trailing slash is dropped so the health
    /// URL never contains `//api`.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let has_extras = parsed.path() != "/"
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || !parsed.username().is_empty()
            || parsed.password().is_some();
        if has_extras {
            return Err(ConfigError::InvalidBaseUrl {
                url: trimmed.to_string(),
                reason: "base url must contain only scheme, host and port".to_string(),
            });
        }

        Ok(Self::from_trusted(trimmed))
    }

    fn from_trusted(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            health: format!("{}{}", base_url, HEALTH_PATH),
        }
    }

    /// Scheme, host and port prefix of every API path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fully qualified health check URL.
    pub fn health(&self) -> &str {
        &self.health
    }
}

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Log filter used when `--verbose` is not given.
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Build mode override (`BUILD_MODE`). The base URL itself cannot be
    /// overridden from the environment.
    #[serde(default)]
    pub build_mode: Option<BuildMode>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: default_log_level(),
            verbose: false,
            build_mode: None,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Effective build mode: the override if set, else the binary's own.
    pub fn build_mode(&self) -> BuildMode {
        self.build_mode.unwrap_or_else(BuildMode::current)
    }

    /// Endpoints for the effective build mode.
    pub fn endpoints(&self) -> ApiEndpoints {
        ApiEndpoints::for_mode(self.build_mode())
    }
}
