//! Server configuration: defaults, optional YAML file, `CEIS_` environment

use emissions_service::config::Config as EmissionsConfig;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// SeaORM connection URL
    pub database_url: String,

    pub logging: LoggingConfig,

    /// Emissions module settings
    pub emissions: EmissionsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database_url: "sqlite://ceis_backend.db?mode=rwc".to_string(),
            logging: LoggingConfig::default(),
            emissions: EmissionsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Filter directives used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            filter: "info,emissions_service=debug,tower_http=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Merge the YAML file (if any) and `CEIS_*` variables over the defaults.
    /// Nested keys use `__`, e.g. `CEIS_EMISSIONS__LCA__PASSWORD`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("CEIS_").split("__"));

        Ok(figment.extract()?)
    }
}
