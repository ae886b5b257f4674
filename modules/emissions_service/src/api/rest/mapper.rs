//! Mappers between contract models and REST DTOs

use super::dto::*;
use crate::contract::{
    AlternativeDetail, Co2Report, Co2Summary, FabricBlockDetail, FabricBlockItem,
    FabricBlockRequirement, FabricBlockType, GarmentRecipe, GarmentType, Location,
    NewFabricBlockItem, NewFabricBlockType, NewGarmentRecipe, NewProcessType, NewResourceType,
    PreparationDetail, ProcessDetail, ProcessStep, ProcessType, RepairComparison,
    RepairScenarioResult, RequirementInput, ResourceAmountInput, ResourceConsumption,
    ResourceDetail, ResourceType, StepInput,
};

// ===== Model to DTO =====

impl From<GarmentType> for GarmentTypeDto {
    fn from(model: GarmentType) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<ProcessStep> for ProcessStepDto {
    fn from(step: ProcessStep) -> Self {
        Self {
            process_id: step.process_id,
            process: step.process_name,
            time: step.time,
        }
    }
}

impl From<FabricBlockType> for FabricBlockTypeDto {
    fn from(model: FabricBlockType) -> Self {
        Self {
            id: model.id,
            name: model.name,
            material: model.material,
            amount_kg: model.amount_kg,
            activity_id: model.activity_id,
            processes: model.processes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ResourceConsumption> for ResourceConsumptionDto {
    fn from(model: ResourceConsumption) -> Self {
        Self {
            resource_id: model.resource_id,
            resource: model.resource_name,
            amount: model.amount,
        }
    }
}

impl From<ProcessType> for ProcessTypeDto {
    fn from(model: ProcessType) -> Self {
        Self {
            id: model.id,
            name: model.name,
            resources: model.resources.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ResourceType> for ResourceTypeDto {
    fn from(model: ResourceType) -> Self {
        Self {
            id: model.id,
            name: model.name,
            unit: model.unit,
            activity_id: model.activity_id,
        }
    }
}

impl From<Location> for LocationDto {
    fn from(model: Location) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<FabricBlockRequirement> for FabricBlockRequirementDto {
    fn from(model: FabricBlockRequirement) -> Self {
        Self {
            type_id: model.fabric_block_type_id,
            fabric_block: model.fabric_block_name,
            amount: model.amount,
        }
    }
}

impl From<GarmentRecipe> for GarmentRecipeDto {
    fn from(model: GarmentRecipe) -> Self {
        Self {
            garment_type: model.garment_type.into(),
            fabric_blocks: model.fabric_blocks.into_iter().map(Into::into).collect(),
            processes: model.processes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FabricBlockItem> for FabricBlockItemDto {
    fn from(model: FabricBlockItem) -> Self {
        Self {
            id: model.id,
            type_id: model.type_id,
            fabric_block: model.type_name,
            co2eq: model.co2eq,
            garment_id: model.garment_id,
            location: model.location.map(Into::into),
            preparations: model.preparations.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Assessment =====

impl From<ResourceDetail> for ResourceEmissionDto {
    fn from(detail: ResourceDetail) -> Self {
        Self {
            resource: detail.resource,
            activity_id: detail.activity_id,
            amount: detail.amount,
            emission: detail.emission,
        }
    }
}

impl From<PreparationDetail> for PreparationDto {
    fn from(detail: PreparationDetail) -> Self {
        Self {
            process: detail.process,
            time: detail.time,
            resources: detail.resources.into_iter().map(Into::into).collect(),
            emission: detail.emission,
        }
    }
}

impl From<AlternativeDetail> for AlternativeDto {
    fn from(detail: AlternativeDetail) -> Self {
        Self {
            id: detail.id,
            location: detail.location,
            distance_km: detail.distance_km,
            preparations: detail.preparations.into_iter().map(Into::into).collect(),
            preparation_emission: detail.preparation_emission,
            transport_emission: detail.transport_emission,
            emission: detail.emission,
        }
    }
}

impl From<FabricBlockDetail> for FabricBlockDetailDto {
    fn from(detail: FabricBlockDetail) -> Self {
        Self {
            fabric_block: detail.fabric_block,
            material: detail.material,
            amount_kg: detail.amount_kg,
            activity_id: detail.activity_id,
            emission: detail.emission,
            production_emission: detail.production_emission,
            alternative: detail.alternative.map(Into::into),
        }
    }
}

impl From<ProcessDetail> for ProcessDetailDto {
    fn from(detail: ProcessDetail) -> Self {
        Self {
            process: detail.process,
            time: detail.time,
            resources: detail.resources.into_iter().map(Into::into).collect(),
            emission: detail.emission,
        }
    }
}

impl From<Co2Summary> for Co2SummaryDto {
    fn from(summary: Co2Summary) -> Self {
        Self {
            baseline_total: summary.baseline_total,
            alternative_total: summary.alternative_total,
            substituted_item_ids: summary.substituted_item_ids,
            avoided_material_emission: summary.avoided_material_emission,
            remaining_preparation_emission: summary.remaining_preparation_emission,
        }
    }
}

impl From<Co2Report> for Co2ReportDto {
    fn from(report: Co2Report) -> Self {
        Self {
            garment_type: report.garment_type.into(),
            fabric_blocks: FabricBlockEmissionsDto {
                total_emission: report.fabric_blocks.total_emission,
                total_production_emission: report.fabric_blocks.total_production_emission,
                details: report.fabric_blocks.details.into_iter().map(Into::into).collect(),
            },
            processes: ProcessEmissionsDto {
                total_emission: report.processes.total_emission,
                details: report.processes.details.into_iter().map(Into::into).collect(),
            },
            summary: report.summary.into(),
        }
    }
}

impl From<RepairScenarioResult> for RepairScenarioDto {
    fn from(result: RepairScenarioResult) -> Self {
        Self {
            use_case: result.use_case,
            route: result.route,
            distance_km: result.distance_km,
            co2_kg: result.co2_kg,
        }
    }
}

impl From<RepairComparison> for RepairComparisonDto {
    fn from(comparison: RepairComparison) -> Self {
        Self {
            amount_kg: comparison.amount_kg,
            scenarios: comparison.scenarios.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Request to input =====

impl From<StepRequest> for StepInput {
    fn from(req: StepRequest) -> Self {
        Self {
            process_id: req.process_id,
            time: req.time,
        }
    }
}

impl From<CreateFabricBlockTypeRequest> for NewFabricBlockType {
    fn from(req: CreateFabricBlockTypeRequest) -> Self {
        Self {
            name: req.name,
            material: req.material,
            amount_kg: req.amount_kg,
            activity_id: req.activity_id,
            processes: req.processes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateProcessTypeRequest> for NewProcessType {
    fn from(req: CreateProcessTypeRequest) -> Self {
        Self {
            name: req.name,
            resources: req
                .resources
                .into_iter()
                .map(|r| ResourceAmountInput {
                    resource_id: r.resource_id,
                    amount: r.amount,
                })
                .collect(),
        }
    }
}

impl From<CreateResourceTypeRequest> for NewResourceType {
    fn from(req: CreateResourceTypeRequest) -> Self {
        Self {
            name: req.name,
            unit: req.unit,
            activity_id: req.activity_id,
        }
    }
}

impl From<SetGarmentRecipeRequest> for NewGarmentRecipe {
    fn from(req: SetGarmentRecipeRequest) -> Self {
        Self {
            garment_type_id: req.garment_type_id,
            fabric_blocks: req
                .fabric_blocks
                .into_iter()
                .map(|r| RequirementInput {
                    type_id: r.type_id,
                    amount: r.amount,
                })
                .collect(),
            processes: req.processes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateFabricBlockRequest> for NewFabricBlockItem {
    fn from(req: CreateFabricBlockRequest) -> Self {
        Self {
            type_id: req.type_id,
            co2eq: req.co2eq,
            garment_id: req.garment_id,
            location_id: req.location_id,
            preparations: req.preparations.into_iter().map(Into::into).collect(),
        }
    }
}
