use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;

/// Endpoint the generation service listens on unless configured otherwise
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/generate";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Where and how to reach the generation service
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(File::from(cli.config.clone()).required(false))?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load `schemagen.{toml,yaml,json}` from `root`, if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("schemagen");
        let settings = Self::load(File::from(config_path).required(false))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    fn load<T>(source: T) -> Result<Self, anyhow::Error>
    where
        T: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .set_default("service.endpoint", DEFAULT_ENDPOINT)?
            .set_default("service.timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64)?
            .add_source(source)
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.service.endpoint = endpoint.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.service.timeout_seconds = timeout;
        }
    }

    fn validate(settings: &Settings) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
