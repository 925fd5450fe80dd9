//! Configuration module for the Pwinty client
//!
//! Settings are captured once when a client is built and never re-read.

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::client::dispatcher::API_PREFIX;

/// Production API host
pub const LIVE_BASE_URL: &str = "https://api.pwinty.com";

/// Sandbox API host
pub const SANDBOX_BASE_URL: &str = "https://sandbox.pwinty.com";

/// Which Pwinty deployment requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PwintyEnvironment {
    #[serde(alias = "production", alias = "LIVE")]
    Live,
    #[default]
    #[serde(alias = "SANDBOX")]
    Sandbox,
}

impl PwintyEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            PwintyEnvironment::Live => LIVE_BASE_URL,
            PwintyEnvironment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Client settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientSettings {
    /// Sent as `X-Pwinty-MerchantId`
    #[serde(default)]
    pub merchant_id: Option<String>,

    /// Sent as `X-Pwinty-REST-API-Key`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub environment: PwintyEnvironment,

    /// Overrides the host chosen by `environment`
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ClientSettings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (`PWINTY_MERCHANT_ID`, `PWINTY_API_KEY`,
    ///    `PWINTY_ENVIRONMENT`, `PWINTY_BASE_URL`)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(Environment::with_prefix("PWINTY").ignore_empty(true));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn with_credentials(mut self, merchant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_environment(mut self, environment: PwintyEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Send requests to another host. Request paths already carry the API
    /// version, so a trailing `/v3.0` on `base_url` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The host every request path is appended to, without a trailing slash
    pub fn resolved_base_url(&self) -> String {
        match self.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let url = url.trim().trim_end_matches('/');
                url.strip_suffix(API_PREFIX).unwrap_or(url).to_string()
            }
            None => self.environment.base_url().to_string(),
        }
    }
}
