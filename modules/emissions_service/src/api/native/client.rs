//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Co2Report, EmissionsApi, EmissionsError, FabricBlockItem, GarmentRecipe, Location,
    RepairComparison,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by other modules in the same process; no HTTP round trip.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmissionsApi for NativeClient {
    async fn garment_co2(&self, garment_type_id: i64) -> Result<Co2Report, EmissionsError> {
        self.service.garment_co2(garment_type_id).await
    }

    async fn repair_comparison(&self, amount_kg: f64) -> Result<RepairComparison, EmissionsError> {
        self.service.repair_comparison(amount_kg).await
    }

    async fn garment_recipe(&self, garment_type_id: i64) -> Result<GarmentRecipe, EmissionsError> {
        self.service.garment_recipe(garment_type_id).await
    }

    async fn list_fabric_blocks(
        &self,
        type_id: Option<i64>,
    ) -> Result<Vec<FabricBlockItem>, EmissionsError> {
        self.service.list_fabric_blocks(type_id).await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, EmissionsError> {
        self.service.list_locations().await
    }
}
