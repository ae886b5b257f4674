//! Port to the external life-cycle-assessment data provider
//!
//! The aggregator only needs two things from the provider: a bearer token and
//! the emission factor of an activity under one methodology. Implementations
//! live in infra/lca.

use crate::contract::{ActivityId, EmissionFactor, EmissionsError};
use async_trait::async_trait;
use thiserror::Error;

/// Bearer token issued by the provider's token exchange
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Failure talking to the LCA provider. Aborts the whole assessment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

impl UpstreamError {
    /// Connection failures, timeouts and 5xx responses are worth one retry
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Malformed { .. } => false,
        }
    }
}

impl From<UpstreamError> for EmissionsError {
    fn from(err: UpstreamError) -> Self {
        EmissionsError::Upstream {
            message: err.to_string(),
        }
    }
}

/// Source of activity emission factors
#[async_trait]
pub trait LcaProvider: Send + Sync {
    /// Exchange the configured credentials for a bearer token
    async fn fetch_token(&self) -> Result<AccessToken, UpstreamError>;

    /// Emission factor of an activity under the configured methodology;
    /// `Ok(None)` when the provider has no entry for it
    async fn emission_factor(
        &self,
        activity_id: ActivityId,
        token: &AccessToken,
    ) -> Result<EmissionFactor, UpstreamError>;
}
