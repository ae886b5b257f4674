//! Contract models for the emissions service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

/// Identifier of an activity in the external LCA database
pub type ActivityId = i64;

/// Emission factor reported by the LCA provider; `None` means the provider
/// had no entry for the configured methodology.
pub type EmissionFactor = Option<f64>;

// ===== Catalog =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarmentType {
    pub id: i64,
    pub name: String,
}

/// Fabric block type together with its preparation recipe
#[derive(Debug, Clone, PartialEq)]
pub struct FabricBlockType {
    pub id: i64,
    pub name: String,
    /// Material label (cotton, polyester, ...)
    pub material: Option<String>,
    /// Per-unit mass in kg; unset is treated as 0 for transport
    pub amount_kg: Option<f64>,
    /// Activity used for the virgin-material emission factor
    pub activity_id: ActivityId,
    /// Production processes run for every new unit of this type
    pub processes: Vec<ProcessStep>,
}

/// Process type together with its resource recipe
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessType {
    pub id: i64,
    pub name: String,
    pub resources: Vec<ResourceConsumption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    pub id: i64,
    pub name: String,
    pub unit: Option<String>,
    pub activity_id: ActivityId,
}

/// Amount of a resource consumed by one run of a process
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConsumption {
    pub resource_id: i64,
    pub resource_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

// ===== Recipes =====

/// A process reference with the time it runs for
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStep {
    pub process_id: i64,
    pub process_name: String,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FabricBlockRequirement {
    pub fabric_block_type_id: i64,
    pub fabric_block_name: String,
    pub amount: u32,
}

/// Stored bill of materials of a garment type
#[derive(Debug, Clone, PartialEq)]
pub struct GarmentRecipe {
    pub garment_type: GarmentType,
    pub fabric_blocks: Vec<FabricBlockRequirement>,
    pub processes: Vec<ProcessStep>,
}

/// Flattened recipe consumed by the aggregator: one fabric block entry per
/// required unit, in requirement order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecipe {
    pub fabric_blocks: Vec<String>,
    pub processes: Vec<(String, f64)>,
}

/// One resource consumed by a process, as seen by the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUse {
    pub name: String,
    pub activity_id: ActivityId,
    pub amount: f64,
}

// ===== Inventory =====

/// Concrete, already-produced fabric block available for reuse
#[derive(Debug, Clone, PartialEq)]
pub struct FabricBlockItem {
    pub id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub co2eq: Option<f64>,
    pub garment_id: Option<i64>,
    pub location: Option<Location>,
    pub preparations: Vec<ProcessStep>,
}

// ===== Create / update inputs =====

#[derive(Debug, Clone, PartialEq)]
pub struct NewFabricBlockType {
    pub name: String,
    pub material: Option<String>,
    pub amount_kg: Option<f64>,
    pub activity_id: ActivityId,
    pub processes: Vec<StepInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProcessType {
    pub name: String,
    pub resources: Vec<ResourceAmountInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResourceType {
    pub name: String,
    pub unit: Option<String>,
    pub activity_id: ActivityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGarmentRecipe {
    pub garment_type_id: i64,
    pub fabric_blocks: Vec<RequirementInput>,
    pub processes: Vec<StepInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFabricBlockItem {
    pub type_id: i64,
    pub co2eq: Option<f64>,
    pub garment_id: Option<i64>,
    pub location_id: Option<i64>,
    pub preparations: Vec<StepInput>,
}

/// `(process_id, time)` reference in a create request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    pub process_id: i64,
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceAmountInput {
    pub resource_id: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementInput {
    pub type_id: i64,
    pub amount: i64,
}

// ===== Assessment report =====

/// Result of a CO2eq assessment for one garment type
#[derive(Debug, Clone, PartialEq)]
pub struct Co2Report {
    pub garment_type: GarmentType,
    pub fabric_blocks: FabricBlockEmissions,
    pub processes: ProcessEmissions,
    pub summary: Co2Summary,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FabricBlockEmissions {
    pub details: Vec<FabricBlockDetail>,
    /// Material emissions only
    pub total_emission: f64,
    pub total_production_emission: f64,
}

/// Baseline emission of one required fabric block unit
#[derive(Debug, Clone, PartialEq)]
pub struct FabricBlockDetail {
    pub fabric_block: String,
    pub material: Option<String>,
    pub amount_kg: f64,
    pub activity_id: ActivityId,
    /// `factor * amount_kg`, `None` when the factor is unknown
    pub emission: Option<f64>,
    /// Resource emissions of the type's production processes
    pub production_emission: f64,
    pub alternative: Option<AlternativeDetail>,
}

/// Second-hand inventory item substituted for a virgin fabric block
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeDetail {
    pub id: i64,
    pub location: Option<String>,
    pub distance_km: Option<f64>,
    pub preparations: Vec<PreparationDetail>,
    pub preparation_emission: f64,
    pub transport_emission: f64,
    /// Preparation plus transport emission of the substitute
    pub emission: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparationDetail {
    pub process: String,
    pub time: f64,
    pub resources: Vec<ResourceDetail>,
    pub emission: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessEmissions {
    pub details: Vec<ProcessDetail>,
    pub total_emission: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessDetail {
    pub process: String,
    pub time: f64,
    pub resources: Vec<ResourceDetail>,
    pub emission: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDetail {
    pub resource: String,
    pub activity_id: ActivityId,
    pub amount: f64,
    /// `factor * amount * time`, `None` when the factor is unknown
    pub emission: Option<f64>,
}

/// Totals derived from the itemized sections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Co2Summary {
    pub baseline_total: f64,
    pub alternative_total: f64,
    pub substituted_item_ids: Vec<i64>,
    /// Material plus production emissions of the substituted units
    pub avoided_material_emission: f64,
    pub remaining_preparation_emission: f64,
}

// ===== Repair comparison =====

#[derive(Debug, Clone, PartialEq)]
pub struct RepairScenarioResult {
    pub use_case: String,
    pub route: String,
    pub distance_km: f64,
    pub co2_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairComparison {
    pub amount_kg: f64,
    pub scenarios: Vec<RepairScenarioResult>,
}
