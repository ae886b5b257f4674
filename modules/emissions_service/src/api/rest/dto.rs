//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GarmentTypeDto {
    pub id: i64,
    #[schema(example = "Crop Top")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGarmentTypeRequest {
    pub name: String,
}

/// Process reference with the time it runs for
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessStepDto {
    pub process_id: i64,
    #[schema(example = "washing")]
    pub process: String,
    pub time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FabricBlockTypeDto {
    pub id: i64,
    #[schema(example = "FB1")]
    pub name: String,
    #[schema(example = "cotton")]
    pub material: Option<String>,
    /// Per-unit mass in kg
    pub amount_kg: Option<f64>,
    /// Activity id in the LCA database
    #[schema(example = 3878)]
    pub activity_id: i64,
    pub processes: Vec<ProcessStepDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StepRequest {
    pub process_id: i64,
    pub time: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFabricBlockTypeRequest {
    pub name: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub amount_kg: Option<f64>,
    pub activity_id: i64,
    #[serde(default)]
    pub processes: Vec<StepRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceConsumptionDto {
    pub resource_id: i64,
    #[schema(example = "water")]
    pub resource: String,
    /// Amount consumed per run
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessTypeDto {
    pub id: i64,
    pub name: String,
    pub resources: Vec<ResourceConsumptionDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResourceAmountRequest {
    pub resource_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProcessTypeRequest {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceAmountRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceTypeDto {
    pub id: i64,
    pub name: String,
    #[schema(example = "kWh")]
    pub unit: Option<String>,
    pub activity_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateResourceTypeRequest {
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub activity_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i64,
    #[schema(example = "Sigmaringen")]
    pub name: String,
}

// ===== Recipe DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FabricBlockRequirementDto {
    pub type_id: i64,
    pub fabric_block: String,
    pub amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GarmentRecipeDto {
    pub garment_type: GarmentTypeDto,
    pub fabric_blocks: Vec<FabricBlockRequirementDto>,
    pub processes: Vec<ProcessStepDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequirementRequest {
    pub type_id: i64,
    pub amount: i64,
}

/// Replaces the whole recipe of the garment type
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetGarmentRecipeRequest {
    pub garment_type_id: i64,
    #[serde(default)]
    pub fabric_blocks: Vec<RequirementRequest>,
    #[serde(default)]
    pub processes: Vec<StepRequest>,
}

// ===== Inventory DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FabricBlockItemDto {
    pub id: i64,
    pub type_id: i64,
    pub fabric_block: String,
    pub co2eq: Option<f64>,
    pub garment_id: Option<i64>,
    pub location: Option<LocationDto>,
    pub preparations: Vec<ProcessStepDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFabricBlockRequest {
    pub type_id: i64,
    #[serde(default)]
    pub co2eq: Option<f64>,
    #[serde(default)]
    pub garment_id: Option<i64>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub preparations: Vec<StepRequest>,
}

// ===== Assessment DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Co2ReportDto {
    pub garment_type: GarmentTypeDto,
    pub fabric_blocks: FabricBlockEmissionsDto,
    pub processes: ProcessEmissionsDto,
    pub summary: Co2SummaryDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FabricBlockEmissionsDto {
    pub total_emission: f64,
    pub total_production_emission: f64,
    pub details: Vec<FabricBlockDetailDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FabricBlockDetailDto {
    pub fabric_block: String,
    pub material: Option<String>,
    pub amount_kg: f64,
    pub activity_id: i64,
    /// `null` when the LCA database has no factor for the methodology
    pub emission: Option<f64>,
    pub production_emission: f64,
    pub alternative: Option<AlternativeDto>,
}

/// Inventory item substituted for a virgin fabric block
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlternativeDto {
    pub id: i64,
    pub location: Option<String>,
    pub distance_km: Option<f64>,
    pub preparations: Vec<PreparationDto>,
    pub preparation_emission: f64,
    pub transport_emission: f64,
    pub emission: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreparationDto {
    pub process: String,
    pub time: f64,
    pub resources: Vec<ResourceEmissionDto>,
    pub emission: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessEmissionsDto {
    pub total_emission: f64,
    pub details: Vec<ProcessDetailDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessDetailDto {
    pub process: String,
    pub time: f64,
    pub resources: Vec<ResourceEmissionDto>,
    pub emission: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceEmissionDto {
    pub resource: String,
    pub activity_id: i64,
    pub amount: f64,
    pub emission: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Co2SummaryDto {
    pub baseline_total: f64,
    pub alternative_total: f64,
    pub substituted_item_ids: Vec<i64>,
    pub avoided_material_emission: f64,
    pub remaining_preparation_emission: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairScenarioDto {
    pub use_case: String,
    pub route: String,
    pub distance_km: f64,
    pub co2_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairComparisonDto {
    pub amount_kg: f64,
    pub scenarios: Vec<RepairScenarioDto>,
}

// ===== List wrappers =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}
