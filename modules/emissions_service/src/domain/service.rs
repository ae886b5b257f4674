//! Domain service - business logic orchestration

use super::aggregator::EmissionsAggregator;
use super::lca::LcaProvider;
use super::repository::{CatalogRepository, InventoryRepository};
use super::storage_failure;
use super::transport::TransportCalculator;
use super::validation;
use crate::config::Config;
use crate::contract::{
    Co2Report, EmissionsError, FabricBlockItem, FabricBlockType, GarmentRecipe, GarmentType,
    Location, NewFabricBlockItem, NewFabricBlockType, NewGarmentRecipe, NewProcessType,
    NewResourceType, ProcessType, RepairComparison, RepairScenarioResult, ResourceType, StepInput,
};
use std::sync::Arc;

/// Domain service for garment emissions and the inventory catalog
pub struct Service {
    catalog: Arc<dyn CatalogRepository>,
    inventory: Arc<dyn InventoryRepository>,
    lca: Arc<dyn LcaProvider>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        inventory: Arc<dyn InventoryRepository>,
        lca: Arc<dyn LcaProvider>,
        config: Config,
    ) -> Self {
        Self {
            catalog,
            inventory,
            lca,
            config,
        }
    }

    // ===== Assessments =====

    /// CO2eq assessment of a garment type
    pub async fn garment_co2(&self, garment_type_id: i64) -> Result<Co2Report, EmissionsError> {
        EmissionsAggregator::new(
            self.catalog.as_ref(),
            self.inventory.as_ref(),
            self.lca.as_ref(),
            &self.config.transport,
        )
        .assess(garment_type_id)
        .await
    }

    /// Truck transport CO2eq of each configured repair scenario
    pub async fn repair_comparison(&self, amount_kg: f64) -> Result<RepairComparison, EmissionsError> {
        validation::validate_quantity("amount_kg", amount_kg)?;

        let token = self.lca.fetch_token().await?;
        let mut transport = TransportCalculator::new(&self.config.transport);
        let factor = transport.factor(self.lca.as_ref(), &token).await?;

        let scenarios = self
            .config
            .repair_scenarios
            .iter()
            .map(|scenario| RepairScenarioResult {
                use_case: scenario.use_case.clone(),
                route: scenario.route.clone(),
                distance_km: scenario.distance_km,
                co2_kg: factor.map(|f| {
                    super::transport::transport_emission(f, scenario.distance_km, amount_kg)
                }),
            })
            .collect();

        Ok(RepairComparison {
            amount_kg,
            scenarios,
        })
    }

    // ===== Garment types =====

    pub async fn list_garment_types(&self) -> Result<Vec<GarmentType>, EmissionsError> {
        self.catalog
            .list_garment_types()
            .await
            .map_err(storage_failure)
    }

    pub async fn create_garment_type(&self, name: &str) -> Result<GarmentType, EmissionsError> {
        validation::validate_name("garment type", name)?;
        let name = name.trim();

        if self
            .catalog
            .find_garment_type_by_name(name)
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(EmissionsError::Conflict {
                reason: format!("Garment type already exists: {}", name),
            });
        }

        let created = self
            .catalog
            .create_garment_type(name)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id = created.id, name = %created.name, "Created garment type");
        Ok(created)
    }

    pub async fn delete_garment_type(&self, id: i64) -> Result<(), EmissionsError> {
        self.require_garment_type(id).await?;
        self.catalog
            .delete_garment_type(id)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id, "Deleted garment type");
        Ok(())
    }

    // ===== Fabric block types =====

    pub async fn list_fabric_block_types(&self) -> Result<Vec<FabricBlockType>, EmissionsError> {
        self.catalog
            .list_fabric_block_types()
            .await
            .map_err(storage_failure)
    }

    pub async fn create_fabric_block_type(
        &self,
        mut input: NewFabricBlockType,
    ) -> Result<FabricBlockType, EmissionsError> {
        validation::validate_fabric_block_type(&input)?;
        input.name = input.name.trim().to_string();

        if self
            .catalog
            .find_fabric_block_type_by_name(&input.name)
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(EmissionsError::Conflict {
                reason: format!("Fabric block type already exists: {}", input.name),
            });
        }
        self.require_processes(&input.processes).await?;

        let created = self
            .catalog
            .create_fabric_block_type(&input)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id = created.id, name = %created.name, "Created fabric block type");
        Ok(created)
    }

    /// Delete a fabric block type with its recipe rows and inventory
    pub async fn delete_fabric_block_type(&self, id: i64) -> Result<(), EmissionsError> {
        if self
            .catalog
            .find_fabric_block_type(id)
            .await
            .map_err(storage_failure)?
            .is_none()
        {
            return Err(EmissionsError::not_found("fabric_block_type", id));
        }

        self.catalog
            .delete_fabric_block_type(id)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id, "Deleted fabric block type");
        Ok(())
    }

    // ===== Process types =====

    pub async fn list_process_types(&self) -> Result<Vec<ProcessType>, EmissionsError> {
        self.catalog
            .list_process_types()
            .await
            .map_err(storage_failure)
    }

    pub async fn create_process_type(
        &self,
        mut input: NewProcessType,
    ) -> Result<ProcessType, EmissionsError> {
        validation::validate_process_type(&input)?;
        input.name = input.name.trim().to_string();

        if self
            .catalog
            .find_process_type_by_name(&input.name)
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(EmissionsError::Conflict {
                reason: format!("Process type already exists: {}", input.name),
            });
        }

        for resource in &input.resources {
            if self
                .catalog
                .find_resource_type(resource.resource_id)
                .await
                .map_err(storage_failure)?
                .is_none()
            {
                return Err(EmissionsError::not_found("resource_type", resource.resource_id));
            }
        }

        let created = self
            .catalog
            .create_process_type(&input)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id = created.id, name = %created.name, "Created process type");
        Ok(created)
    }

    pub async fn delete_process_type(&self, id: i64) -> Result<(), EmissionsError> {
        if self
            .catalog
            .find_process_type(id)
            .await
            .map_err(storage_failure)?
            .is_none()
        {
            return Err(EmissionsError::not_found("process_type", id));
        }

        self.catalog
            .delete_process_type(id)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id, "Deleted process type");
        Ok(())
    }

    // ===== Resource types =====

    pub async fn list_resource_types(&self) -> Result<Vec<ResourceType>, EmissionsError> {
        self.catalog
            .list_resource_types()
            .await
            .map_err(storage_failure)
    }

    pub async fn create_resource_type(
        &self,
        mut input: NewResourceType,
    ) -> Result<ResourceType, EmissionsError> {
        validation::validate_resource_type(&input)?;
        input.name = input.name.trim().to_string();

        if self
            .catalog
            .find_resource_type_by_name(&input.name)
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(EmissionsError::Conflict {
                reason: format!("Resource type already exists: {}", input.name),
            });
        }

        let created = self
            .catalog
            .create_resource_type(&input)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id = created.id, name = %created.name, "Created resource type");
        Ok(created)
    }

    pub async fn delete_resource_type(&self, id: i64) -> Result<(), EmissionsError> {
        if self
            .catalog
            .find_resource_type(id)
            .await
            .map_err(storage_failure)?
            .is_none()
        {
            return Err(EmissionsError::not_found("resource_type", id));
        }

        self.catalog
            .delete_resource_type(id)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id, "Deleted resource type");
        Ok(())
    }

    // ===== Garment recipes =====

    pub async fn garment_recipe(&self, garment_type_id: i64) -> Result<GarmentRecipe, EmissionsError> {
        self.catalog
            .find_garment_recipe(garment_type_id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| EmissionsError::not_found("garment_type", garment_type_id))
    }

    /// Replace the recipe of a garment type
    pub async fn set_garment_recipe(
        &self,
        input: NewGarmentRecipe,
    ) -> Result<GarmentRecipe, EmissionsError> {
        validation::validate_garment_recipe(&input)?;
        self.require_garment_type(input.garment_type_id).await?;

        for requirement in &input.fabric_blocks {
            if self
                .catalog
                .find_fabric_block_type(requirement.type_id)
                .await
                .map_err(storage_failure)?
                .is_none()
            {
                return Err(EmissionsError::not_found("fabric_block_type", requirement.type_id));
            }
        }
        self.require_processes(&input.processes).await?;

        let recipe = self
            .catalog
            .replace_garment_recipe(&input)
            .await
            .map_err(storage_failure)?;
        tracing::info!(
            garment_type_id = input.garment_type_id,
            fabric_blocks = recipe.fabric_blocks.len(),
            processes = recipe.processes.len(),
            "Stored garment recipe"
        );
        Ok(recipe)
    }

    // ===== Inventory =====

    pub async fn list_fabric_blocks(
        &self,
        type_id: Option<i64>,
    ) -> Result<Vec<FabricBlockItem>, EmissionsError> {
        self.inventory
            .list_items(type_id)
            .await
            .map_err(storage_failure)
    }

    /// Log a concrete fabric block into the inventory
    pub async fn create_fabric_block(
        &self,
        input: NewFabricBlockItem,
    ) -> Result<FabricBlockItem, EmissionsError> {
        validation::validate_fabric_block_item(&input)?;

        if self
            .catalog
            .find_fabric_block_type(input.type_id)
            .await
            .map_err(storage_failure)?
            .is_none()
        {
            return Err(EmissionsError::not_found("fabric_block_type", input.type_id));
        }
        if let Some(location_id) = input.location_id {
            if self
                .inventory
                .find_location(location_id)
                .await
                .map_err(storage_failure)?
                .is_none()
            {
                return Err(EmissionsError::not_found("location", location_id));
            }
        }
        self.require_processes(&input.preparations).await?;

        let created = self
            .inventory
            .create_item(&input)
            .await
            .map_err(storage_failure)?;
        tracing::info!(
            id = created.id,
            fabric_block = %created.type_name,
            preparations = created.preparations.len(),
            "Logged fabric block into inventory"
        );
        Ok(created)
    }

    pub async fn delete_fabric_block(&self, id: i64) -> Result<(), EmissionsError> {
        if self
            .inventory
            .find_item(id)
            .await
            .map_err(storage_failure)?
            .is_none()
        {
            return Err(EmissionsError::not_found("fabric_block", id));
        }

        self.inventory
            .delete_item(id)
            .await
            .map_err(storage_failure)?;
        tracing::info!(id, "Removed fabric block from inventory");
        Ok(())
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, EmissionsError> {
        self.inventory
            .list_locations()
            .await
            .map_err(storage_failure)
    }

    // ===== Helper Methods =====

    async fn require_garment_type(&self, id: i64) -> Result<GarmentType, EmissionsError> {
        self.catalog
            .find_garment_type(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| EmissionsError::not_found("garment_type", id))
    }

    async fn require_processes(&self, steps: &[StepInput]) -> Result<(), EmissionsError> {
        for step in steps {
            if self
                .catalog
                .find_process_type(step.process_id)
                .await
                .map_err(storage_failure)?
                .is_none()
            {
                return Err(EmissionsError::not_found("process_type", step.process_id));
            }
        }
        Ok(())
    }
}
