//! HTTP client for the ecoinvent activity API behind WISER

use super::dto::{ActivityResponse, TokenResponse};
use crate::config::LcaConfig;
use crate::contract::{ActivityId, EmissionFactor};
use crate::domain::{AccessToken, LcaProvider, UpstreamError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;

/// LCA provider backed by the WISER ecoinvent API.
///
/// Every request is bounded by the configured timeout. Transient failures
/// are retried once; 4xx responses and malformed payloads are not.
pub struct WiserClient {
    http: reqwest::Client,
    config: LcaConfig,
}

impl WiserClient {
    pub fn new(config: LcaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn activity_url(&self, activity_id: ActivityId) -> String {
        format!("{}/activity/{}/", self.config.api_base.trim_end_matches('/'), activity_id)
    }

    async fn request_token(&self) -> Result<AccessToken, UpstreamError> {
        let url = &self.config.token_url;
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let token: TokenResponse = decode(url, response).await?;
        tracing::debug!(expires_in = ?token.expires_in, "Obtained LCA access token");
        Ok(AccessToken::new(token.access_token))
    }

    async fn request_factor(
        &self,
        activity_id: ActivityId,
        token: &AccessToken,
    ) -> Result<EmissionFactor, UpstreamError> {
        let url = self.activity_url(activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let activity: ActivityResponse = decode(&url, response).await?;
        let factor = activity.emissions_for(&self.config.method);
        tracing::debug!(activity_id, ?factor, method = %self.config.method, "Fetched emission factor");
        Ok(factor)
    }
}

#[async_trait]
impl LcaProvider for WiserClient {
    async fn fetch_token(&self) -> Result<AccessToken, UpstreamError> {
        retry_once("token exchange", move || self.request_token()).await
    }

    async fn emission_factor(
        &self,
        activity_id: ActivityId,
        token: &AccessToken,
    ) -> Result<EmissionFactor, UpstreamError> {
        retry_once("activity lookup", move || self.request_factor(activity_id, token)).await
    }
}

/// Run `call`, and run it a second time if the first failure is transient
async fn retry_once<T, F, Fut>(operation: &str, mut call: F) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    match call().await {
        Err(err) if err.is_transient() => {
            tracing::warn!(error = %err, "LCA {} failed, retrying once", operation);
            call().await
        }
        result => result,
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| transport_error(url, e))?;
    serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
        url: url.to_string(),
        message: e.to_string(),
    })
}
