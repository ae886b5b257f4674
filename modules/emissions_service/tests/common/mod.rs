//! Shared test fixtures: in-memory repositories and a scripted LCA provider

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use emissions_service::config::Config;
use emissions_service::contract::*;
use emissions_service::domain::repository::{CatalogRepository, InventoryRepository};
use emissions_service::domain::{AccessToken, LcaProvider, Service, UpstreamError};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ===== Catalog =====

#[derive(Default)]
struct CatalogState {
    next_id: i64,
    garment_types: BTreeMap<i64, GarmentType>,
    fabric_block_types: BTreeMap<i64, FabricBlockType>,
    process_types: BTreeMap<i64, ProcessType>,
    resource_types: BTreeMap<i64, ResourceType>,
    recipes: BTreeMap<i64, (Vec<FabricBlockRequirement>, Vec<ProcessStep>)>,
}

impl CatalogState {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn step(&self, process_id: i64, time: f64) -> Result<ProcessStep> {
        let process = self
            .process_types
            .get(&process_id)
            .ok_or_else(|| anyhow!("unknown process {}", process_id))?;
        Ok(ProcessStep {
            process_id,
            process_name: process.name.clone(),
            time,
        })
    }
}

#[derive(Clone, Default)]
pub struct MockCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_garment(&self, name: &str) -> i64 {
        let mut state = self.state.write();
        let id = state.next();
        state.garment_types.insert(
            id,
            GarmentType {
                id,
                name: name.to_string(),
            },
        );
        state.recipes.insert(id, (Vec::new(), Vec::new()));
        id
    }

    pub fn add_resource(&self, name: &str, activity_id: i64) -> i64 {
        let mut state = self.state.write();
        let id = state.next();
        state.resource_types.insert(
            id,
            ResourceType {
                id,
                name: name.to_string(),
                unit: None,
                activity_id,
            },
        );
        id
    }

    /// Register a process consuming `(resource_id, amount)` per run
    pub fn add_process(&self, name: &str, resources: &[(i64, f64)]) -> i64 {
        let mut state = self.state.write();
        let id = state.next();
        let resources = resources
            .iter()
            .map(|(resource_id, amount)| ResourceConsumption {
                resource_id: *resource_id,
                resource_name: state.resource_types[resource_id].name.clone(),
                amount: *amount,
            })
            .collect();
        state.process_types.insert(
            id,
            ProcessType {
                id,
                name: name.to_string(),
                resources,
            },
        );
        id
    }

    pub fn add_fabric_block(&self, name: &str, amount_kg: Option<f64>, activity_id: i64) -> i64 {
        let mut state = self.state.write();
        let id = state.next();
        state.fabric_block_types.insert(
            id,
            FabricBlockType {
                id,
                name: name.to_string(),
                material: Some("cotton".to_string()),
                amount_kg,
                activity_id,
                processes: Vec::new(),
            },
        );
        id
    }

    /// Production processes of a fabric block type as `(process_id, time)`
    pub fn set_production(&self, type_id: i64, processes: &[(i64, f64)]) {
        let mut state = self.state.write();
        let steps: Vec<ProcessStep> = processes
            .iter()
            .map(|(process_id, time)| ProcessStep {
                process_id: *process_id,
                process_name: state.process_types[process_id].name.clone(),
                time: *time,
            })
            .collect();
        if let Some(block_type) = state.fabric_block_types.get_mut(&type_id) {
            block_type.processes = steps;
        }
    }

    /// Set a recipe of `(fabric_block_type_id, amount)` and `(process_id, time)`
    pub fn set_recipe(&self, garment_id: i64, blocks: &[(i64, u32)], processes: &[(i64, f64)]) {
        let mut state = self.state.write();
        let blocks = blocks
            .iter()
            .map(|(type_id, amount)| FabricBlockRequirement {
                fabric_block_type_id: *type_id,
                fabric_block_name: state.fabric_block_types[type_id].name.clone(),
                amount: *amount,
            })
            .collect();
        let steps = processes
            .iter()
            .map(|(process_id, time)| ProcessStep {
                process_id: *process_id,
                process_name: state.process_types[process_id].name.clone(),
                time: *time,
            })
            .collect();
        state.recipes.insert(garment_id, (blocks, steps));
    }
}

#[async_trait]
impl CatalogRepository for MockCatalog {
    async fn list_garment_types(&self) -> Result<Vec<GarmentType>> {
        Ok(self.state.read().garment_types.values().cloned().collect())
    }

    async fn find_garment_type(&self, id: i64) -> Result<Option<GarmentType>> {
        Ok(self.state.read().garment_types.get(&id).cloned())
    }

    async fn find_garment_type_by_name(&self, name: &str) -> Result<Option<GarmentType>> {
        Ok(self
            .state
            .read()
            .garment_types
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn create_garment_type(&self, name: &str) -> Result<GarmentType> {
        let id = self.add_garment(name);
        Ok(GarmentType {
            id,
            name: name.to_string(),
        })
    }

    async fn delete_garment_type(&self, id: i64) -> Result<()> {
        let mut state = self.state.write();
        state.garment_types.remove(&id);
        state.recipes.remove(&id);
        Ok(())
    }

    async fn list_fabric_block_types(&self) -> Result<Vec<FabricBlockType>> {
        Ok(self.state.read().fabric_block_types.values().cloned().collect())
    }

    async fn find_fabric_block_type(&self, id: i64) -> Result<Option<FabricBlockType>> {
        Ok(self.state.read().fabric_block_types.get(&id).cloned())
    }

    async fn find_fabric_block_type_by_name(&self, name: &str) -> Result<Option<FabricBlockType>> {
        Ok(self
            .state
            .read()
            .fabric_block_types
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn create_fabric_block_type(&self, input: &NewFabricBlockType) -> Result<FabricBlockType> {
        let mut state = self.state.write();
        let processes = input
            .processes
            .iter()
            .map(|s| state.step(s.process_id, s.time))
            .collect::<Result<Vec<_>>>()?;
        let id = state.next();
        let created = FabricBlockType {
            id,
            name: input.name.clone(),
            material: input.material.clone(),
            amount_kg: input.amount_kg,
            activity_id: input.activity_id,
            processes,
        };
        state.fabric_block_types.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_fabric_block_type(&self, id: i64) -> Result<()> {
        let mut state = self.state.write();
        state.fabric_block_types.remove(&id);
        for (blocks, _) in state.recipes.values_mut() {
            blocks.retain(|b| b.fabric_block_type_id != id);
        }
        Ok(())
    }

    async fn list_process_types(&self) -> Result<Vec<ProcessType>> {
        Ok(self.state.read().process_types.values().cloned().collect())
    }

    async fn find_process_type(&self, id: i64) -> Result<Option<ProcessType>> {
        Ok(self.state.read().process_types.get(&id).cloned())
    }

    async fn find_process_type_by_name(&self, name: &str) -> Result<Option<ProcessType>> {
        Ok(self
            .state
            .read()
            .process_types
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn create_process_type(&self, input: &NewProcessType) -> Result<ProcessType> {
        let resources: Vec<(i64, f64)> = input
            .resources
            .iter()
            .map(|r| (r.resource_id, r.amount))
            .collect();
        let id = self.add_process(&input.name, &resources);
        self.find_process_type(id)
            .await?
            .ok_or_else(|| anyhow!("process {} vanished", id))
    }

    async fn delete_process_type(&self, id: i64) -> Result<()> {
        let mut state = self.state.write();
        state.process_types.remove(&id);
        for (_, steps) in state.recipes.values_mut() {
            steps.retain(|s| s.process_id != id);
        }
        for block_type in state.fabric_block_types.values_mut() {
            block_type.processes.retain(|s| s.process_id != id);
        }
        Ok(())
    }

    async fn resources_for_process(&self, process_name: &str) -> Result<Vec<ResourceUse>> {
        let state = self.state.read();
        let Some(process) = state.process_types.values().find(|p| p.name == process_name) else {
            return Ok(Vec::new());
        };
        Ok(process
            .resources
            .iter()
            .map(|r| ResourceUse {
                name: r.resource_name.clone(),
                activity_id: state.resource_types[&r.resource_id].activity_id,
                amount: r.amount,
            })
            .collect())
    }

    async fn list_resource_types(&self) -> Result<Vec<ResourceType>> {
        Ok(self.state.read().resource_types.values().cloned().collect())
    }

    async fn find_resource_type(&self, id: i64) -> Result<Option<ResourceType>> {
        Ok(self.state.read().resource_types.get(&id).cloned())
    }

    async fn find_resource_type_by_name(&self, name: &str) -> Result<Option<ResourceType>> {
        Ok(self
            .state
            .read()
            .resource_types
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn create_resource_type(&self, input: &NewResourceType) -> Result<ResourceType> {
        let id = self.add_resource(&input.name, input.activity_id);
        let mut state = self.state.write();
        let resource = state
            .resource_types
            .get_mut(&id)
            .ok_or_else(|| anyhow!("resource {} vanished", id))?;
        resource.unit = input.unit.clone();
        Ok(resource.clone())
    }

    async fn delete_resource_type(&self, id: i64) -> Result<()> {
        let mut state = self.state.write();
        state.resource_types.remove(&id);
        for process in state.process_types.values_mut() {
            process.resources.retain(|r| r.resource_id != id);
        }
        Ok(())
    }

    async fn find_garment_recipe(&self, garment_type_id: i64) -> Result<Option<GarmentRecipe>> {
        let state = self.state.read();
        let Some(garment) = state.garment_types.get(&garment_type_id) else {
            return Ok(None);
        };
        let (blocks, steps) = state.recipes.get(&garment_type_id).cloned().unwrap_or_default();
        Ok(Some(GarmentRecipe {
            garment_type: garment.clone(),
            fabric_blocks: blocks,
            processes: steps,
        }))
    }

    async fn replace_garment_recipe(&self, recipe: &NewGarmentRecipe) -> Result<GarmentRecipe> {
        let blocks: Vec<(i64, u32)> = recipe
            .fabric_blocks
            .iter()
            .map(|r| (r.type_id, r.amount as u32))
            .collect();
        let steps: Vec<(i64, f64)> = recipe
            .processes
            .iter()
            .map(|s| (s.process_id, s.time))
            .collect();
        self.set_recipe(recipe.garment_type_id, &blocks, &steps);
        self.find_garment_recipe(recipe.garment_type_id)
            .await?
            .ok_or_else(|| anyhow!("garment {} vanished", recipe.garment_type_id))
    }
}

// ===== Inventory =====

#[derive(Clone)]
pub struct MockInventory {
    catalog: MockCatalog,
    items: Arc<RwLock<BTreeMap<i64, FabricBlockItem>>>,
    locations: Arc<RwLock<BTreeMap<i64, Location>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockInventory {
    /// Inventory sharing type names with `catalog`
    pub fn new(catalog: &MockCatalog) -> Self {
        let locations = ["Bucharest", "Sigmaringen", "St. Gallen"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let id = i as i64 + 1;
                (
                    id,
                    Location {
                        id,
                        name: name.to_string(),
                    },
                )
            })
            .collect();

        Self {
            catalog: catalog.clone(),
            items: Arc::new(RwLock::new(BTreeMap::new())),
            locations: Arc::new(RwLock::new(locations)),
            next_id: Arc::new(Mutex::new(100)),
        }
    }

    pub fn location(&self, name: &str) -> Option<Location> {
        self.locations.read().values().find(|l| l.name == name).cloned()
    }

    /// Log an item of `type_id` with `(process_id, time)` preparations
    pub fn add_item(&self, type_id: i64, location: Option<&str>, preparations: &[(i64, f64)]) -> i64 {
        let state = self.catalog.state.read();
        let type_name = state.fabric_block_types[&type_id].name.clone();
        let preparations = preparations
            .iter()
            .map(|(process_id, time)| ProcessStep {
                process_id: *process_id,
                process_name: state.process_types[process_id].name.clone(),
                time: *time,
            })
            .collect();
        drop(state);

        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            *next
        };
        self.items.write().insert(
            id,
            FabricBlockItem {
                id,
                type_id,
                type_name,
                co2eq: None,
                garment_id: None,
                location: location.and_then(|name| self.location(name)),
                preparations,
            },
        );
        id
    }

    pub fn count(&self) -> usize {
        self.items.read().len()
    }
}

#[async_trait]
impl InventoryRepository for MockInventory {
    async fn list_items(&self, type_id: Option<i64>) -> Result<Vec<FabricBlockItem>> {
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| type_id.map_or(true, |t| item.type_id == t))
            .cloned()
            .collect())
    }

    async fn items_by_type_name(&self, type_name: &str) -> Result<Vec<FabricBlockItem>> {
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| item.type_name == type_name)
            .cloned()
            .collect())
    }

    async fn find_item(&self, id: i64) -> Result<Option<FabricBlockItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn create_item(&self, input: &NewFabricBlockItem) -> Result<FabricBlockItem> {
        let location_name = input
            .location_id
            .and_then(|id| self.locations.read().get(&id).map(|l| l.name.clone()));
        let preparations: Vec<(i64, f64)> = input
            .preparations
            .iter()
            .map(|s| (s.process_id, s.time))
            .collect();
        let id = self.add_item(input.type_id, location_name.as_deref(), &preparations);

        let mut items = self.items.write();
        let item = items
            .get_mut(&id)
            .ok_or_else(|| anyhow!("item {} vanished", id))?;
        item.co2eq = input.co2eq;
        item.garment_id = input.garment_id;
        Ok(item.clone())
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.items.write().remove(&id);
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<Location>> {
        Ok(self.locations.read().values().cloned().collect())
    }

    async fn find_location(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.locations.read().get(&id).cloned())
    }
}

// ===== LCA provider =====

/// LCA provider answering from a fixed factor table, counting calls
#[derive(Default)]
pub struct MockLca {
    factors: RwLock<HashMap<i64, f64>>,
    failing_activity: RwLock<Option<i64>>,
    token_failure: RwLock<bool>,
    token_calls: Mutex<usize>,
    factor_calls: Mutex<Vec<i64>>,
}

impl MockLca {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factor(self, activity_id: i64, factor: f64) -> Self {
        self.factors.write().insert(activity_id, factor);
        self
    }

    /// Make lookups of `activity_id` fail with a 503
    pub fn failing_on(self, activity_id: i64) -> Self {
        *self.failing_activity.write() = Some(activity_id);
        self
    }

    pub fn failing_token(self) -> Self {
        *self.token_failure.write() = true;
        self
    }

    pub fn token_calls(&self) -> usize {
        *self.token_calls.lock()
    }

    pub fn factor_calls(&self) -> Vec<i64> {
        self.factor_calls.lock().clone()
    }

    pub fn calls_for(&self, activity_id: i64) -> usize {
        self.factor_calls
            .lock()
            .iter()
            .filter(|id| **id == activity_id)
            .count()
    }
}

#[async_trait]
impl LcaProvider for MockLca {
    async fn fetch_token(&self) -> Result<AccessToken, UpstreamError> {
        *self.token_calls.lock() += 1;
        if *self.token_failure.read() {
            return Err(UpstreamError::Status {
                url: "mock://token".to_string(),
                status: 401,
            });
        }
        Ok(AccessToken::new("test-token"))
    }

    async fn emission_factor(
        &self,
        activity_id: i64,
        _token: &AccessToken,
    ) -> Result<EmissionFactor, UpstreamError> {
        self.factor_calls.lock().push(activity_id);
        if *self.failing_activity.read() == Some(activity_id) {
            return Err(UpstreamError::Status {
                url: format!("mock://activity/{}/", activity_id),
                status: 503,
            });
        }
        Ok(self.factors.read().get(&activity_id).copied())
    }
}

// ===== Wiring =====

pub struct TestContext {
    pub catalog: MockCatalog,
    pub inventory: MockInventory,
    pub lca: Arc<MockLca>,
    pub service: Arc<Service>,
}

impl TestContext {
    pub fn new(catalog: MockCatalog, inventory: MockInventory, lca: MockLca, config: Config) -> Self {
        let lca = Arc::new(lca);
        let service = Arc::new(Service::new(
            Arc::new(catalog.clone()),
            Arc::new(inventory.clone()),
            lca.clone(),
            config,
        ));
        Self {
            catalog,
            inventory,
            lca,
            service,
        }
    }
}

/// Config with a transport activity (id 900) configured
pub fn config_with_transport() -> Config {
    let mut config = Config::default();
    config.transport.activity_id = Some(TRANSPORT_ACTIVITY);
    config
}

pub fn config_without_transport() -> Config {
    let mut config = Config::default();
    config.transport.activity_id = None;
    config
}

pub const TRANSPORT_ACTIVITY: i64 = 900;
