//! Transport emission addendum

use super::lca::{AccessToken, LcaProvider, UpstreamError};
use crate::config::TransportConfig;
use crate::contract::{EmissionFactor, Location};

/// CO2eq of shipping `mass_kg` over `distance_km`.
///
/// `factor` is expressed per tonne-kilometre.
pub fn transport_emission(factor: f64, distance_km: f64, mass_kg: f64) -> f64 {
    factor / 1000.0 * distance_km * mass_kg
}

/// Transport calculator scoped to one assessment.
///
/// The transport factor is fetched at most once, on first use.
pub struct TransportCalculator<'a> {
    config: &'a TransportConfig,
    factor: Option<EmissionFactor>,
}

impl<'a> TransportCalculator<'a> {
    pub fn new(config: &'a TransportConfig) -> Self {
        Self {
            config,
            factor: None,
        }
    }

    /// Fixed distance to the assembly site; `None` for unknown locations
    pub fn distance_km(&self, location: Option<&Location>) -> Option<f64> {
        location.and_then(|loc| self.config.distance_km(&loc.name))
    }

    /// Transport contribution of one item. Unknown distance, unset mass,
    /// unconfigured activity and unknown factor all contribute 0.
    pub async fn contribution(
        &mut self,
        lca: &dyn LcaProvider,
        token: &AccessToken,
        distance_km: Option<f64>,
        mass_kg: Option<f64>,
    ) -> Result<f64, UpstreamError> {
        let Some(distance_km) = distance_km else {
            return Ok(0.0);
        };

        match self.factor(lca, token).await? {
            Some(factor) => Ok(transport_emission(factor, distance_km, mass_kg.unwrap_or(0.0))),
            None => Ok(0.0),
        }
    }

    /// Per-tkm transport factor, fetched once
    pub async fn factor(
        &mut self,
        lca: &dyn LcaProvider,
        token: &AccessToken,
    ) -> Result<EmissionFactor, UpstreamError> {
        if let Some(factor) = self.factor {
            return Ok(factor);
        }

        let factor = match self.config.activity_id {
            Some(activity_id) => lca.emission_factor(activity_id, token).await?,
            None => {
                tracing::warn!("No transport activity configured, transport emissions count as 0");
                None
            }
        };
        self.factor = Some(factor);
        Ok(factor)
    }
}
