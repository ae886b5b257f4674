//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the
//! emissions service. NO HTTP - direct function calls.

use super::{
    error::EmissionsError,
    model::{Co2Report, FabricBlockItem, GarmentRecipe, Location, RepairComparison},
};
use async_trait::async_trait;

/// Emissions service API for inter-module communication
#[async_trait]
pub trait EmissionsApi: Send + Sync {
    /// Compute the CO2eq assessment of a garment type
    async fn garment_co2(&self, garment_type_id: i64) -> Result<Co2Report, EmissionsError>;

    /// Compare repair transport scenarios for a textile mass
    async fn repair_comparison(&self, amount_kg: f64) -> Result<RepairComparison, EmissionsError>;

    /// Get the stored recipe of a garment type
    async fn garment_recipe(&self, garment_type_id: i64) -> Result<GarmentRecipe, EmissionsError>;

    /// List the fabric block inventory, optionally restricted to one type
    async fn list_fabric_blocks(
        &self,
        type_id: Option<i64>,
    ) -> Result<Vec<FabricBlockItem>, EmissionsError>;

    /// List known sourcing locations
    async fn list_locations(&self) -> Result<Vec<Location>, EmissionsError>;
}
