//! SeaORM repository implementations

use crate::contract::{
    FabricBlockItem, FabricBlockRequirement, FabricBlockType, GarmentRecipe, GarmentType,
    Location, NewFabricBlockItem, NewFabricBlockType, NewGarmentRecipe, NewProcessType,
    NewResourceType, ProcessStep, ProcessType, ResourceConsumption, ResourceType, ResourceUse,
};
use crate::domain::repository::{CatalogRepository, InventoryRepository};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity::{
    fabric_block_inventory, fabric_block_recipe_process, fabric_block_type,
    garment_recipe_fabric_block, garment_recipe_process, garment_type, location,
    preparation_record, process_resource_consumption, process_type, resource_type,
};
use super::mapper;

// ===== Catalog Repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_garment_types(&self) -> Result<Vec<GarmentType>> {
        let results = garment_type::Entity::find()
            .order_by_asc(garment_type::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_garment_type(&self, id: i64) -> Result<Option<GarmentType>> {
        let result = garment_type::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_garment_type_by_name(&self, name: &str) -> Result<Option<GarmentType>> {
        let result = garment_type::Entity::find()
            .filter(garment_type::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn create_garment_type(&self, name: &str) -> Result<GarmentType> {
        let created = garment_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&*self.db)
        .await?;

        Ok(created.into())
    }

    async fn delete_garment_type(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        garment_recipe_fabric_block::Entity::delete_many()
            .filter(garment_recipe_fabric_block::Column::GarmentTypeId.eq(id))
            .exec(&txn)
            .await?;
        garment_recipe_process::Entity::delete_many()
            .filter(garment_recipe_process::Column::GarmentTypeId.eq(id))
            .exec(&txn)
            .await?;
        garment_type::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_fabric_block_types(&self) -> Result<Vec<FabricBlockType>> {
        let results = fabric_block_type::Entity::find()
            .order_by_asc(fabric_block_type::Column::Id)
            .all(&*self.db)
            .await?;

        let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
        let mut steps = fabric_block_steps(&*self.db, &ids).await?;

        Ok(results
            .into_iter()
            .map(|m| {
                let processes = steps.remove(&m.id).unwrap_or_default();
                mapper::fabric_block_type(m, processes)
            })
            .collect())
    }

    async fn find_fabric_block_type(&self, id: i64) -> Result<Option<FabricBlockType>> {
        let result = fabric_block_type::Entity::find_by_id(id).one(&*self.db).await?;
        with_fabric_block_steps(&*self.db, result).await
    }

    async fn find_fabric_block_type_by_name(&self, name: &str) -> Result<Option<FabricBlockType>> {
        let result = fabric_block_type::Entity::find()
            .filter(fabric_block_type::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        with_fabric_block_steps(&*self.db, result).await
    }

    async fn create_fabric_block_type(&self, input: &NewFabricBlockType) -> Result<FabricBlockType> {
        let txn = self.db.begin().await?;

        let active: fabric_block_type::ActiveModel = input.into();
        let created = active.insert(&txn).await?;

        for step in &input.processes {
            fabric_block_recipe_process::ActiveModel {
                id: NotSet,
                fabric_block_type_id: Set(created.id),
                process_id: Set(step.process_id),
                time: Set(step.time),
            }
            .insert(&txn)
            .await?;
        }

        let id = created.id;
        let loaded = with_fabric_block_steps(&txn, Some(created)).await?;
        txn.commit().await?;

        loaded.ok_or_else(|| anyhow!("fabric block type {} vanished after insert", id))
    }

    async fn delete_fabric_block_type(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        garment_recipe_fabric_block::Entity::delete_many()
            .filter(garment_recipe_fabric_block::Column::FabricBlockId.eq(id))
            .exec(&txn)
            .await?;
        fabric_block_recipe_process::Entity::delete_many()
            .filter(fabric_block_recipe_process::Column::FabricBlockTypeId.eq(id))
            .exec(&txn)
            .await?;

        let item_ids: Vec<i64> = fabric_block_inventory::Entity::find()
            .filter(fabric_block_inventory::Column::TypeId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|item| item.id)
            .collect();
        preparation_record::Entity::delete_many()
            .filter(preparation_record::Column::FabricBlockId.is_in(item_ids))
            .exec(&txn)
            .await?;
        fabric_block_inventory::Entity::delete_many()
            .filter(fabric_block_inventory::Column::TypeId.eq(id))
            .exec(&txn)
            .await?;

        fabric_block_type::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_process_types(&self) -> Result<Vec<ProcessType>> {
        let results = process_type::Entity::find()
            .order_by_asc(process_type::Column::Id)
            .all(&*self.db)
            .await?;

        let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
        let mut resources = process_resources(&*self.db, &ids).await?;

        Ok(results
            .into_iter()
            .map(|m| {
                let consumption = resources.remove(&m.id).unwrap_or_default();
                mapper::process_type(m, consumption)
            })
            .collect())
    }

    async fn find_process_type(&self, id: i64) -> Result<Option<ProcessType>> {
        let result = process_type::Entity::find_by_id(id).one(&*self.db).await?;
        with_process_resources(&*self.db, result).await
    }

    async fn find_process_type_by_name(&self, name: &str) -> Result<Option<ProcessType>> {
        let result = process_type::Entity::find()
            .filter(process_type::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        with_process_resources(&*self.db, result).await
    }

    async fn create_process_type(&self, input: &NewProcessType) -> Result<ProcessType> {
        let txn = self.db.begin().await?;

        let created = process_type::ActiveModel {
            id: NotSet,
            name: Set(input.name.clone()),
        }
        .insert(&txn)
        .await?;

        for resource in &input.resources {
            process_resource_consumption::ActiveModel {
                id: NotSet,
                process_id: Set(created.id),
                resource_id: Set(resource.resource_id),
                amount: Set(resource.amount),
            }
            .insert(&txn)
            .await?;
        }

        let id = created.id;
        let loaded = with_process_resources(&txn, Some(created)).await?;
        txn.commit().await?;

        loaded.ok_or_else(|| anyhow!("process type {} vanished after insert", id))
    }

    async fn delete_process_type(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        process_resource_consumption::Entity::delete_many()
            .filter(process_resource_consumption::Column::ProcessId.eq(id))
            .exec(&txn)
            .await?;
        garment_recipe_process::Entity::delete_many()
            .filter(garment_recipe_process::Column::ProcessId.eq(id))
            .exec(&txn)
            .await?;
        fabric_block_recipe_process::Entity::delete_many()
            .filter(fabric_block_recipe_process::Column::ProcessId.eq(id))
            .exec(&txn)
            .await?;
        preparation_record::Entity::delete_many()
            .filter(preparation_record::Column::ProcessId.eq(id))
            .exec(&txn)
            .await?;
        process_type::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn resources_for_process(&self, process_name: &str) -> Result<Vec<ResourceUse>> {
        let Some(process) = process_type::Entity::find()
            .filter(process_type::Column::Name.eq(process_name))
            .one(&*self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        let rows = process_resource_consumption::Entity::find()
            .filter(process_resource_consumption::Column::ProcessId.eq(process.id))
            .order_by_asc(process_resource_consumption::Column::Id)
            .find_also_related(resource_type::Entity)
            .all(&*self.db)
            .await?;

        rows.into_iter()
            .map(|(row, resource)| {
                let resource = resource.ok_or_else(|| {
                    anyhow!("resource {} used by {} is missing", row.resource_id, process_name)
                })?;
                Ok(ResourceUse {
                    name: resource.name,
                    activity_id: resource.activity_id,
                    amount: row.amount,
                })
            })
            .collect()
    }

    async fn list_resource_types(&self) -> Result<Vec<ResourceType>> {
        let results = resource_type::Entity::find()
            .order_by_asc(resource_type::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_resource_type(&self, id: i64) -> Result<Option<ResourceType>> {
        let result = resource_type::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_resource_type_by_name(&self, name: &str) -> Result<Option<ResourceType>> {
        let result = resource_type::Entity::find()
            .filter(resource_type::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn create_resource_type(&self, input: &NewResourceType) -> Result<ResourceType> {
        let active: resource_type::ActiveModel = input.into();
        let created = active.insert(&*self.db).await?;
        Ok(created.into())
    }

    async fn delete_resource_type(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        process_resource_consumption::Entity::delete_many()
            .filter(process_resource_consumption::Column::ResourceId.eq(id))
            .exec(&txn)
            .await?;
        resource_type::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn find_garment_recipe(&self, garment_type_id: i64) -> Result<Option<GarmentRecipe>> {
        match garment_type::Entity::find_by_id(garment_type_id)
            .one(&*self.db)
            .await?
        {
            Some(garment) => Ok(Some(recipe_of(&*self.db, garment).await?)),
            None => Ok(None),
        }
    }

    async fn replace_garment_recipe(&self, recipe: &NewGarmentRecipe) -> Result<GarmentRecipe> {
        let txn = self.db.begin().await?;

        let garment = garment_type::Entity::find_by_id(recipe.garment_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow!("garment type {} not found", recipe.garment_type_id))?;

        garment_recipe_fabric_block::Entity::delete_many()
            .filter(garment_recipe_fabric_block::Column::GarmentTypeId.eq(garment.id))
            .exec(&txn)
            .await?;
        garment_recipe_process::Entity::delete_many()
            .filter(garment_recipe_process::Column::GarmentTypeId.eq(garment.id))
            .exec(&txn)
            .await?;

        for requirement in &recipe.fabric_blocks {
            garment_recipe_fabric_block::ActiveModel {
                id: NotSet,
                garment_type_id: Set(garment.id),
                fabric_block_id: Set(requirement.type_id),
                amount: Set(requirement.amount),
            }
            .insert(&txn)
            .await?;
        }
        for step in &recipe.processes {
            garment_recipe_process::ActiveModel {
                id: NotSet,
                garment_type_id: Set(garment.id),
                process_id: Set(step.process_id),
                time: Set(step.time),
            }
            .insert(&txn)
            .await?;
        }

        let stored = recipe_of(&txn, garment).await?;
        txn.commit().await?;
        Ok(stored)
    }
}

// ===== Inventory Repository =====

pub struct SeaOrmInventoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmInventoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepository for SeaOrmInventoryRepository {
    async fn list_items(&self, type_id: Option<i64>) -> Result<Vec<FabricBlockItem>> {
        let mut query = fabric_block_inventory::Entity::find();
        if let Some(type_id) = type_id {
            query = query.filter(fabric_block_inventory::Column::TypeId.eq(type_id));
        }

        let rows = query
            .order_by_asc(fabric_block_inventory::Column::Id)
            .find_also_related(location::Entity)
            .all(&*self.db)
            .await?;

        hydrate_items(&*self.db, rows).await
    }

    async fn items_by_type_name(&self, type_name: &str) -> Result<Vec<FabricBlockItem>> {
        let block_type = fabric_block_type::Entity::find()
            .filter(fabric_block_type::Column::Name.eq(type_name))
            .one(&*self.db)
            .await?;

        match block_type {
            Some(block_type) => self.list_items(Some(block_type.id)).await,
            None => Ok(Vec::new()),
        }
    }

    async fn find_item(&self, id: i64) -> Result<Option<FabricBlockItem>> {
        let row = fabric_block_inventory::Entity::find_by_id(id)
            .find_also_related(location::Entity)
            .one(&*self.db)
            .await?;

        Ok(hydrate_items(&*self.db, row.into_iter().collect())
            .await?
            .into_iter()
            .next())
    }

    async fn create_item(&self, input: &NewFabricBlockItem) -> Result<FabricBlockItem> {
        let txn = self.db.begin().await?;

        let active: fabric_block_inventory::ActiveModel = input.into();
        let created = active.insert(&txn).await?;

        for step in &input.preparations {
            preparation_record::ActiveModel {
                id: NotSet,
                process_id: Set(step.process_id),
                time: Set(step.time),
                fabric_block_id: Set(created.id),
            }
            .insert(&txn)
            .await?;
        }

        let location = match created.location_id {
            Some(location_id) => location::Entity::find_by_id(location_id).one(&txn).await?,
            None => None,
        };
        let id = created.id;
        let stored = hydrate_items(&txn, vec![(created, location)]).await?;
        txn.commit().await?;

        stored
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("fabric block {} vanished after insert", id))
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        preparation_record::Entity::delete_many()
            .filter(preparation_record::Column::FabricBlockId.eq(id))
            .exec(&txn)
            .await?;
        fabric_block_inventory::Entity::delete_by_id(id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        let results = location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn find_location(&self, id: i64) -> Result<Option<Location>> {
        let result = location::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }
}

// ===== Query Helpers =====

/// Preparation steps of the given fabric block types, keyed by type id
async fn fabric_block_steps<C: ConnectionTrait>(
    conn: &C,
    type_ids: &[i64],
) -> Result<HashMap<i64, Vec<ProcessStep>>> {
    let rows = fabric_block_recipe_process::Entity::find()
        .filter(fabric_block_recipe_process::Column::FabricBlockTypeId.is_in(type_ids.iter().copied()))
        .order_by_asc(fabric_block_recipe_process::Column::Id)
        .find_also_related(process_type::Entity)
        .all(conn)
        .await?;

    let mut steps: HashMap<i64, Vec<ProcessStep>> = HashMap::new();
    for (row, process) in rows {
        let process = process.ok_or_else(|| {
            anyhow!(
                "process {} of fabric block type {} is missing",
                row.process_id,
                row.fabric_block_type_id
            )
        })?;
        steps
            .entry(row.fabric_block_type_id)
            .or_default()
            .push(mapper::process_step(&process, row.time));
    }
    Ok(steps)
}

async fn with_fabric_block_steps<C: ConnectionTrait>(
    conn: &C,
    model: Option<fabric_block_type::Model>,
) -> Result<Option<FabricBlockType>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let processes = fabric_block_steps(conn, &[model.id])
        .await?
        .remove(&model.id)
        .unwrap_or_default();
    Ok(Some(mapper::fabric_block_type(model, processes)))
}

/// Resource consumption of the given process types, keyed by process id
async fn process_resources<C: ConnectionTrait>(
    conn: &C,
    process_ids: &[i64],
) -> Result<HashMap<i64, Vec<ResourceConsumption>>> {
    let rows = process_resource_consumption::Entity::find()
        .filter(process_resource_consumption::Column::ProcessId.is_in(process_ids.iter().copied()))
        .order_by_asc(process_resource_consumption::Column::Id)
        .find_also_related(resource_type::Entity)
        .all(conn)
        .await?;

    let mut resources: HashMap<i64, Vec<ResourceConsumption>> = HashMap::new();
    for (row, resource) in rows {
        let resource = resource.ok_or_else(|| {
            anyhow!("resource {} of process {} is missing", row.resource_id, row.process_id)
        })?;
        resources
            .entry(row.process_id)
            .or_default()
            .push(ResourceConsumption {
                resource_id: resource.id,
                resource_name: resource.name,
                amount: row.amount,
            });
    }
    Ok(resources)
}

async fn with_process_resources<C: ConnectionTrait>(
    conn: &C,
    model: Option<process_type::Model>,
) -> Result<Option<ProcessType>> {
    let Some(model) = model else {
        return Ok(None);
    };
    let resources = process_resources(conn, &[model.id])
        .await?
        .remove(&model.id)
        .unwrap_or_default();
    Ok(Some(mapper::process_type(model, resources)))
}

/// Stored recipe of a garment type, rows in id order
async fn recipe_of<C: ConnectionTrait>(conn: &C, garment: garment_type::Model) -> Result<GarmentRecipe> {
    let block_rows = garment_recipe_fabric_block::Entity::find()
        .filter(garment_recipe_fabric_block::Column::GarmentTypeId.eq(garment.id))
        .order_by_asc(garment_recipe_fabric_block::Column::Id)
        .find_also_related(fabric_block_type::Entity)
        .all(conn)
        .await?;

    let mut fabric_blocks = Vec::with_capacity(block_rows.len());
    for (row, block_type) in block_rows {
        let block_type = block_type.ok_or_else(|| {
            anyhow!("fabric block type {} of garment {} is missing", row.fabric_block_id, garment.id)
        })?;
        fabric_blocks.push(FabricBlockRequirement {
            fabric_block_type_id: block_type.id,
            fabric_block_name: block_type.name,
            amount: u32::try_from(row.amount)?,
        });
    }

    let process_rows = garment_recipe_process::Entity::find()
        .filter(garment_recipe_process::Column::GarmentTypeId.eq(garment.id))
        .order_by_asc(garment_recipe_process::Column::Id)
        .find_also_related(process_type::Entity)
        .all(conn)
        .await?;

    let mut processes = Vec::with_capacity(process_rows.len());
    for (row, process) in process_rows {
        let process = process.ok_or_else(|| {
            anyhow!("process {} of garment {} is missing", row.process_id, garment.id)
        })?;
        processes.push(mapper::process_step(&process, row.time));
    }

    Ok(GarmentRecipe {
        garment_type: garment.into(),
        fabric_blocks,
        processes,
    })
}

/// Attach type names and preparation steps to raw inventory rows
async fn hydrate_items<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<(fabric_block_inventory::Model, Option<location::Model>)>,
) -> Result<Vec<FabricBlockItem>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let type_ids: Vec<i64> = rows.iter().map(|(item, _)| item.type_id).collect();
    let type_names: HashMap<i64, String> = fabric_block_type::Entity::find()
        .filter(fabric_block_type::Column::Id.is_in(type_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let item_ids: Vec<i64> = rows.iter().map(|(item, _)| item.id).collect();
    let prep_rows = preparation_record::Entity::find()
        .filter(preparation_record::Column::FabricBlockId.is_in(item_ids))
        .order_by_asc(preparation_record::Column::Id)
        .find_also_related(process_type::Entity)
        .all(conn)
        .await?;

    let mut preparations: HashMap<i64, Vec<ProcessStep>> = HashMap::new();
    for (row, process) in prep_rows {
        let process = process.ok_or_else(|| {
            anyhow!("process {} of fabric block {} is missing", row.process_id, row.fabric_block_id)
        })?;
        preparations
            .entry(row.fabric_block_id)
            .or_default()
            .push(mapper::process_step(&process, row.time));
    }

    rows.into_iter()
        .map(|(item, location)| {
            let type_name = type_names
                .get(&item.type_id)
                .cloned()
                .ok_or_else(|| anyhow!("fabric block type {} of item {} is missing", item.type_id, item.id))?;
            let steps = preparations.remove(&item.id).unwrap_or_default();
            Ok(mapper::fabric_block_item(item, type_name, location, steps))
        })
        .collect()
}
