//! Input validation for catalog and inventory writes

use crate::contract::{
    EmissionsError, NewFabricBlockItem, NewFabricBlockType, NewGarmentRecipe, NewProcessType,
    NewResourceType, StepInput,
};

/// Validate a type name: non-empty after trimming
pub fn validate_name(kind: &str, name: &str) -> Result<(), EmissionsError> {
    if name.trim().is_empty() {
        return Err(EmissionsError::validation(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    Ok(())
}

/// Validate a non-negative, finite quantity
pub fn validate_quantity(field: &str, value: f64) -> Result<(), EmissionsError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EmissionsError::validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn validate_steps(field: &str, steps: &[StepInput]) -> Result<(), EmissionsError> {
    steps
        .iter()
        .try_for_each(|step| validate_quantity(&format!("{}.time", field), step.time))
}

pub fn validate_fabric_block_type(input: &NewFabricBlockType) -> Result<(), EmissionsError> {
    validate_name("fabric block type", &input.name)?;
    if let Some(mass) = input.amount_kg {
        validate_quantity("amount_kg", mass)?;
    }
    validate_steps("processes", &input.processes)
}

pub fn validate_process_type(input: &NewProcessType) -> Result<(), EmissionsError> {
    validate_name("process type", &input.name)?;
    for resource in &input.resources {
        validate_quantity("resources.amount", resource.amount)?;
    }

    // At most one consumption row per (process, resource)
    let mut seen = std::collections::BTreeSet::new();
    for resource in &input.resources {
        if !seen.insert(resource.resource_id) {
            return Err(EmissionsError::validation(format!(
                "resource {} listed more than once",
                resource.resource_id
            )));
        }
    }
    Ok(())
}

pub fn validate_resource_type(input: &NewResourceType) -> Result<(), EmissionsError> {
    validate_name("resource type", &input.name)
}

pub fn validate_garment_recipe(input: &NewGarmentRecipe) -> Result<(), EmissionsError> {
    for requirement in &input.fabric_blocks {
        if requirement.amount < 1 {
            return Err(EmissionsError::validation(format!(
                "fabric block {} amount must be at least 1, got {}",
                requirement.type_id, requirement.amount
            )));
        }
        if requirement.amount > u32::MAX as i64 {
            return Err(EmissionsError::validation(format!(
                "fabric block {} amount is too large",
                requirement.type_id
            )));
        }
    }
    validate_steps("processes", &input.processes)
}

pub fn validate_fabric_block_item(input: &NewFabricBlockItem) -> Result<(), EmissionsError> {
    if let Some(co2eq) = input.co2eq {
        validate_quantity("co2eq", co2eq)?;
    }
    validate_steps("preparations", &input.preparations)
}
