//! Wire types of the WISER token endpoint and activity API

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityResponse {
    pub lcia_results: Vec<LciaResult>,
}

#[derive(Debug, Deserialize)]
pub struct LciaResult {
    pub method: LciaMethod,
    #[serde(default)]
    pub emissions: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LciaMethod {
    pub name: String,
}

impl ActivityResponse {
    /// Emissions of the first result reported under `method`
    pub fn emissions_for(&self, method: &str) -> Option<f64> {
        self.lcia_results
            .iter()
            .find(|result| result.method.name == method)
            .and_then(|result| result.emissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_configured_method() {
        let body = r#"{"lcia_results":[
            {"method":{"name":"EF v3.1"},"emissions":9.0},
            {"method":{"name":"IPCC 2021"},"emissions":2.5}
        ]}"#;
        let response: ActivityResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.emissions_for("IPCC 2021"), Some(2.5));
        assert_eq!(response.emissions_for("ReCiPe"), None);
    }

    #[test]
    fn missing_results_is_malformed() {
        assert!(serde_json::from_str::<ActivityResponse>(r#"{"name":"cotton"}"#).is_err());
    }
}
