//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    fabric_block_inventory, fabric_block_type, garment_type, location, process_type,
    resource_type,
};
use crate::contract::{
    FabricBlockItem, FabricBlockType, GarmentType, Location, NewFabricBlockItem,
    NewFabricBlockType, NewResourceType, ProcessStep, ProcessType, ResourceConsumption,
    ResourceType,
};
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Catalog Conversions =====

impl From<garment_type::Model> for GarmentType {
    fn from(entity: garment_type::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<resource_type::Model> for ResourceType {
    fn from(entity: resource_type::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            unit: entity.unit,
            activity_id: entity.activity_id,
        }
    }
}

impl From<location::Model> for Location {
    fn from(entity: location::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

pub fn fabric_block_type(entity: fabric_block_type::Model, processes: Vec<ProcessStep>) -> FabricBlockType {
    FabricBlockType {
        id: entity.id,
        name: entity.name,
        material: entity.material,
        amount_kg: entity.amount_kg,
        activity_id: entity.activity_id,
        processes,
    }
}

pub fn process_type(entity: process_type::Model, resources: Vec<ResourceConsumption>) -> ProcessType {
    ProcessType {
        id: entity.id,
        name: entity.name,
        resources,
    }
}

pub fn process_step(process: &process_type::Model, time: f64) -> ProcessStep {
    ProcessStep {
        process_id: process.id,
        process_name: process.name.clone(),
        time,
    }
}

// ===== Inventory Conversions =====

pub fn fabric_block_item(
    entity: fabric_block_inventory::Model,
    type_name: String,
    location: Option<location::Model>,
    preparations: Vec<ProcessStep>,
) -> FabricBlockItem {
    FabricBlockItem {
        id: entity.id,
        type_id: entity.type_id,
        type_name,
        co2eq: entity.co2eq,
        garment_id: entity.garment_id,
        location: location.map(Into::into),
        preparations,
    }
}

// ===== Active Models =====

impl From<&NewFabricBlockType> for fabric_block_type::ActiveModel {
    fn from(input: &NewFabricBlockType) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name.clone()),
            material: Set(input.material.clone()),
            amount_kg: Set(input.amount_kg),
            activity_id: Set(input.activity_id),
        }
    }
}

impl From<&NewResourceType> for resource_type::ActiveModel {
    fn from(input: &NewResourceType) -> Self {
        Self {
            id: NotSet,
            name: Set(input.name.clone()),
            unit: Set(input.unit.clone()),
            activity_id: Set(input.activity_id),
        }
    }
}

impl From<&NewFabricBlockItem> for fabric_block_inventory::ActiveModel {
    fn from(input: &NewFabricBlockItem) -> Self {
        Self {
            id: NotSet,
            type_id: Set(input.type_id),
            co2eq: Set(input.co2eq),
            garment_id: Set(input.garment_id),
            location_id: Set(input.location_id),
        }
    }
}
