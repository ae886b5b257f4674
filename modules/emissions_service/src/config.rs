//! Configuration for the emissions service module

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Emissions service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External LCA provider access
    #[serde(default)]
    pub lca: LcaConfig,

    /// Transport emission settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Repair scenarios compared by `/co2/repair`
    #[serde(default = "default_repair_scenarios")]
    pub repair_scenarios: Vec<RepairScenario>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lca: LcaConfig::default(),
            transport: TransportConfig::default(),
            repair_scenarios: default_repair_scenarios(),
        }
    }
}

/// LCA provider (ecoinvent via WISER) configuration
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LcaConfig {
    /// Base URL of the activity API; activities live under `{api_base}/activity/{id}/`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// OpenID Connect token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Reporting methodology the emission factor is taken from
    #[serde(default = "default_method")]
    pub method: String,

    /// Per-request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for LcaConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_url: default_token_url(),
            client_id: default_client_id(),
            username: String::new(),
            password: String::new(),
            method: default_method(),
            timeout: default_timeout(),
        }
    }
}

impl std::fmt::Debug for LcaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcaConfig")
            .field("api_base", &self.api_base)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"***")
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Transport emission configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Activity whose factor (kg CO2eq per tkm) prices truck transport.
    /// Set to `null` to disable transport; every contribution is then 0.
    #[serde(default = "default_transport_activity")]
    pub activity_id: Option<i64>,

    /// Fixed distance from a sourcing location (by name) to the assembly site
    #[serde(default = "default_distances")]
    pub distances_km: BTreeMap<String, f64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            activity_id: default_transport_activity(),
            distances_km: default_distances(),
        }
    }
}

impl TransportConfig {
    /// Distance for a location name, if the location is in the table
    pub fn distance_km(&self, location: &str) -> Option<f64> {
        self.distances_km.get(location).copied()
    }
}

/// One repair transport scenario
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepairScenario {
    pub use_case: String,
    pub route: String,
    pub distance_km: f64,
}

fn default_api_base() -> String {
    "https://api.wiser.ehealth.hevs.ch/ecoinvent/3.11-cutoff".to_string()
}

fn default_token_url() -> String {
    "https://auth.wiser.ehealth.hevs.ch/realms/wiser/protocol/openid-connect/token".to_string()
}

fn default_client_id() -> String {
    "wiser-api-public".to_string()
}

fn default_method() -> String {
    "IPCC 2021".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_transport_activity() -> Option<i64> {
    Some(7309)
}

fn default_distances() -> BTreeMap<String, f64> {
    // Assembly site: St. Gallen
    BTreeMap::from([
        ("St. Gallen".to_string(), 10.0),
        ("Sigmaringen".to_string(), 110.0),
        ("Bucharest".to_string(), 1650.0),
    ])
}

fn default_repair_scenarios() -> Vec<RepairScenario> {
    vec![
        RepairScenario {
            use_case: "Repair at repair center".to_string(),
            route: "Sigmaringen -> St. Gallen -> Sigmaringen".to_string(),
            distance_km: 220.0,
        },
        RepairScenario {
            use_case: "Repair at manufacturer".to_string(),
            route: "Sigmaringen -> Bucharest -> Sigmaringen".to_string(),
            distance_km: 3300.0,
        },
        RepairScenario {
            use_case: "Replacement from manufacturer".to_string(),
            route: "Bucharest -> Sigmaringen".to_string(),
            distance_km: 1650.0,
        },
    ]
}
