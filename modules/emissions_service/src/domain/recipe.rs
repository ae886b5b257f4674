//! Recipe and resource resolution for the aggregator

use super::repository::CatalogRepository;
use super::storage_failure;
use crate::contract::{EmissionsError, GarmentRecipe, GarmentType, ResolvedRecipe, ResourceUse};

/// Expand a garment's bill of materials.
///
/// A fabric block requirement of amount N yields N identical entries so that
/// each unit gets its own substitution attempt.
pub async fn resolve_recipe(
    catalog: &dyn CatalogRepository,
    garment_type_id: i64,
) -> Result<(GarmentType, ResolvedRecipe), EmissionsError> {
    let recipe = catalog
        .find_garment_recipe(garment_type_id)
        .await
        .map_err(storage_failure)?
        .ok_or_else(|| EmissionsError::not_found("garment_type", garment_type_id))?;

    let resolved = flatten_recipe(&recipe);
    tracing::debug!(
        garment = %recipe.garment_type.name,
        fabric_blocks = resolved.fabric_blocks.len(),
        processes = resolved.processes.len(),
        "Resolved garment recipe"
    );

    Ok((recipe.garment_type, resolved))
}

/// Flatten stored requirements, keeping requirement order
pub fn flatten_recipe(recipe: &GarmentRecipe) -> ResolvedRecipe {
    let fabric_blocks = recipe
        .fabric_blocks
        .iter()
        .flat_map(|req| std::iter::repeat(req.fabric_block_name.clone()).take(req.amount as usize))
        .collect();

    let processes = recipe
        .processes
        .iter()
        .map(|step| (step.process_name.clone(), step.time))
        .collect();

    ResolvedRecipe {
        fabric_blocks,
        processes,
    }
}

/// Resources consumed by one run of a process. A process without registered
/// consumption yields an empty list.
pub async fn resolve_resources(
    catalog: &dyn CatalogRepository,
    process_name: &str,
) -> Result<Vec<ResourceUse>, EmissionsError> {
    let resources = catalog
        .resources_for_process(process_name)
        .await
        .map_err(storage_failure)?;

    if resources.is_empty() {
        tracing::debug!(process = %process_name, "No resource consumption registered");
    }
    Ok(resources)
}
