//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories

use crate::contract::{
    FabricBlockItem, FabricBlockType, GarmentRecipe, GarmentType, Location, NewFabricBlockItem,
    NewFabricBlockType, NewGarmentRecipe, NewProcessType, NewResourceType, ProcessType,
    ResourceType, ResourceUse,
};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for garment, fabric block, process and resource types and
/// their recipes
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== Garment types =====

    async fn list_garment_types(&self) -> Result<Vec<GarmentType>>;

    async fn find_garment_type(&self, id: i64) -> Result<Option<GarmentType>>;

    async fn find_garment_type_by_name(&self, name: &str) -> Result<Option<GarmentType>>;

    async fn create_garment_type(&self, name: &str) -> Result<GarmentType>;

    /// Delete a garment type together with its recipe rows, atomically
    async fn delete_garment_type(&self, id: i64) -> Result<()>;

    // ===== Fabric block types =====

    async fn list_fabric_block_types(&self) -> Result<Vec<FabricBlockType>>;

    async fn find_fabric_block_type(&self, id: i64) -> Result<Option<FabricBlockType>>;

    async fn find_fabric_block_type_by_name(&self, name: &str) -> Result<Option<FabricBlockType>>;

    async fn create_fabric_block_type(&self, input: &NewFabricBlockType) -> Result<FabricBlockType>;

    /// Delete a fabric block type and every row depending on it, atomically
    async fn delete_fabric_block_type(&self, id: i64) -> Result<()>;

    // ===== Process types =====

    async fn list_process_types(&self) -> Result<Vec<ProcessType>>;

    async fn find_process_type(&self, id: i64) -> Result<Option<ProcessType>>;

    async fn find_process_type_by_name(&self, name: &str) -> Result<Option<ProcessType>>;

    async fn create_process_type(&self, input: &NewProcessType) -> Result<ProcessType>;

    /// Delete a process type and every row depending on it, atomically
    async fn delete_process_type(&self, id: i64) -> Result<()>;

    /// Resources consumed by one run of the named process
    async fn resources_for_process(&self, process_name: &str) -> Result<Vec<ResourceUse>>;

    // ===== Resource types =====

    async fn list_resource_types(&self) -> Result<Vec<ResourceType>>;

    async fn find_resource_type(&self, id: i64) -> Result<Option<ResourceType>>;

    async fn find_resource_type_by_name(&self, name: &str) -> Result<Option<ResourceType>>;

    async fn create_resource_type(&self, input: &NewResourceType) -> Result<ResourceType>;

    /// Delete a resource type and its consumption rows, atomically
    async fn delete_resource_type(&self, id: i64) -> Result<()>;

    // ===== Garment recipes =====

    /// Recipe of a garment type; requirement rows in storage order
    async fn find_garment_recipe(&self, garment_type_id: i64) -> Result<Option<GarmentRecipe>>;

    /// Replace the recipe of a garment type, atomically
    async fn replace_garment_recipe(&self, recipe: &NewGarmentRecipe) -> Result<GarmentRecipe>;
}

/// Repository for the fabric block inventory and sourcing locations
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// List inventory items ordered by id ascending
    async fn list_items(&self, type_id: Option<i64>) -> Result<Vec<FabricBlockItem>>;

    /// Items of the named fabric block type ordered by id ascending
    async fn items_by_type_name(&self, type_name: &str) -> Result<Vec<FabricBlockItem>>;

    async fn find_item(&self, id: i64) -> Result<Option<FabricBlockItem>>;

    async fn create_item(&self, input: &NewFabricBlockItem) -> Result<FabricBlockItem>;

    /// Delete an item and its preparation records, atomically
    async fn delete_item(&self, id: i64) -> Result<()>;

    async fn list_locations(&self) -> Result<Vec<Location>>;

    async fn find_location(&self, id: i64) -> Result<Option<Location>>;
}
