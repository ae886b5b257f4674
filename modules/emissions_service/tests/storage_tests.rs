//! SeaORM storage tests against a migrated, seeded SQLite file

mod common;

use common::*;
use emissions_service::config::Config;
use emissions_service::contract::*;
use emissions_service::domain::{CatalogRepository, Service};
use emissions_service::infra::storage::entity::fabric_block_recipe_process;
use emissions_service::infra::storage::{
    Migrator, SeaOrmCatalogRepository, SeaOrmInventoryRepository,
};
use emissions_service::EmissionsServiceModule;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait, PaginatorTrait,
    Statement,
};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tempfile::TempDir;

struct TestDb {
    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
    db: Arc<DatabaseConnection>,
    service: Service,
    lca: Arc<MockLca>,
}

async fn connect(dir: &TempDir) -> Arc<DatabaseConnection> {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("ceis.db").display());
    let db = Database::connect(&url).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

async fn seeded(lca: MockLca) -> TestDb {
    let dir = TempDir::new().expect("temp dir");
    let db = connect(&dir).await;
    let lca = Arc::new(lca);

    let service = Service::new(
        Arc::new(SeaOrmCatalogRepository::new(db.clone())),
        Arc::new(SeaOrmInventoryRepository::new(db.clone())),
        lca.clone(),
        Config::default(),
    );

    TestDb {
        _dir: dir,
        db,
        service,
        lca,
    }
}

async fn garment_id(service: &Service, name: &str) -> i64 {
    service
        .list_garment_types()
        .await
        .unwrap()
        .into_iter()
        .find(|g| g.name == name)
        .unwrap_or_else(|| panic!("garment type {} not seeded", name))
        .id
}

async fn fabric_block_type(service: &Service, name: &str) -> FabricBlockType {
    service
        .list_fabric_block_types()
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("fabric block type {} not seeded", name))
}

async fn process_id(service: &Service, name: &str) -> i64 {
    service
        .list_process_types()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("process type {} not seeded", name))
        .id
}

#[tokio::test]
async fn test_seed_data_is_present() {
    print_test_header(
        "test_seed_data_is_present",
        &["Migrations create the demo catalog, recipes and locations"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;

    let garments: Vec<String> = service
        .list_garment_types()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(garments, vec!["Crop Top", "Skirt"]);

    let fb1 = fabric_block_type(service, "FB1").await;
    assert_eq!(fb1.material.as_deref(), Some("cotton"));
    assert_eq!(fb1.amount_kg, Some(1.5));
    assert_eq!(fb1.activity_id, 3878);
    assert_eq!(fb1.processes.len(), 1);
    assert_eq!(fb1.processes[0].process_name, "dyeing");

    let washing = service
        .list_process_types()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == "washing")
        .unwrap();
    assert_eq!(washing.resources.len(), 2);

    let crop_top = garment_id(service, "Crop Top").await;
    let recipe = service.garment_recipe(crop_top).await.unwrap();
    let blocks: Vec<(String, u32)> = recipe
        .fabric_blocks
        .iter()
        .map(|r| (r.fabric_block_name.clone(), r.amount))
        .collect();
    assert_eq!(blocks, vec![("FB1".to_string(), 2), ("FB2".to_string(), 1)]);
    assert_eq!(recipe.processes.len(), 2);

    let locations: Vec<String> = service
        .list_locations()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(locations, vec!["Bucharest", "Sigmaringen", "St. Gallen"]);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    print_test_header(
        "test_migrations_are_idempotent",
        &["Running the migrator twice does not seed twice"],
    );

    let dir = TempDir::new().unwrap();
    let db = connect(&dir).await;
    Migrator::up(db.as_ref(), None).await.unwrap();

    let catalog = SeaOrmCatalogRepository::new(db);
    assert_eq!(catalog.list_garment_types().await.unwrap().len(), 2);
}

async fn production_rows(db: &DatabaseConnection) -> u64 {
    fabric_block_recipe_process::Entity::find()
        .count(db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fresh_database_records_each_migration_once() {
    print_test_header(
        "test_fresh_database_records_each_migration_once",
        &["Every migration is tracked under its own version"],
    );

    let dir = TempDir::new().unwrap();
    let db = connect(&dir).await;

    let rows = db
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT version FROM seaql_migrations ORDER BY version",
        ))
        .await
        .unwrap();
    let versions: Vec<String> = rows
        .iter()
        .map(|row| row.try_get::<String>("", "version").unwrap())
        .collect();

    assert_eq!(
        versions,
        vec![
            "m20250101_000001_create_catalog",
            "m20250101_000002_create_recipes",
            "m20250101_000003_create_inventory",
            "m20250101_000004_seed_demo_data",
        ]
    );
}

#[tokio::test]
async fn test_delete_fabric_block_type_removes_production_rows() {
    print_test_header(
        "test_delete_fabric_block_type_removes_production_rows",
        &["A type produced by three processes leaves no production rows behind"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let before = production_rows(&db.db).await;

    let mut steps = Vec::new();
    for (name, time) in [("sewing", 1.0), ("washing", 2.0), ("dyeing", 3.0)] {
        steps.push(StepInput {
            process_id: process_id(service, name).await,
            time,
        });
    }
    let denim = service
        .create_fabric_block_type(NewFabricBlockType {
            name: "Denim".to_string(),
            material: Some("cotton".to_string()),
            amount_kg: Some(0.8),
            activity_id: 3878,
            processes: steps,
        })
        .await
        .unwrap();
    assert_eq!(denim.processes.len(), 3);
    assert_eq!(production_rows(&db.db).await, before + 3);

    service.delete_fabric_block_type(denim.id).await.unwrap();
    assert_eq!(production_rows(&db.db).await, before);

    let err = service.delete_fabric_block_type(denim.id).await.unwrap_err();
    assert_eq!(err, EmissionsError::not_found("fabric_block_type", denim.id));
}

#[tokio::test]
async fn test_delete_fabric_block_type_cascades() {
    print_test_header(
        "test_delete_fabric_block_type_cascades",
        &[
            "FB1 is referenced by two garment recipes, one preparation row",
            "and inventory items; deleting it removes all of them",
        ],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let fb1 = fabric_block_type(service, "FB1").await;
    let dyeing = process_id(service, "dyeing").await;

    service
        .create_fabric_block(NewFabricBlockItem {
            type_id: fb1.id,
            co2eq: None,
            garment_id: None,
            location_id: None,
            preparations: vec![StepInput {
                process_id: dyeing,
                time: 1.0,
            }],
        })
        .await
        .unwrap();

    service.delete_fabric_block_type(fb1.id).await.unwrap();

    for garment in ["Crop Top", "Skirt"] {
        let id = garment_id(service, garment).await;
        let recipe = service.garment_recipe(id).await.unwrap();
        assert!(
            recipe.fabric_blocks.iter().all(|r| r.fabric_block_name != "FB1"),
            "{} still references FB1",
            garment
        );
    }
    assert!(service.list_fabric_blocks(Some(fb1.id)).await.unwrap().is_empty());
    assert_eq!(service.list_fabric_block_types().await.unwrap().len(), 1);

    let err = service.delete_fabric_block_type(fb1.id).await.unwrap_err();
    assert_eq!(err, EmissionsError::not_found("fabric_block_type", fb1.id));
}

#[tokio::test]
async fn test_delete_process_type_cascades() {
    print_test_header(
        "test_delete_process_type_cascades",
        &["Removing washing clears it from garment and fabric block recipes"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let washing = process_id(service, "washing").await;

    service.delete_process_type(washing).await.unwrap();

    let crop_top = garment_id(service, "Crop Top").await;
    let recipe = service.garment_recipe(crop_top).await.unwrap();
    let steps: Vec<&str> = recipe
        .processes
        .iter()
        .map(|s| s.process_name.as_str())
        .collect();
    assert_eq!(steps, vec!["sewing"]);

    let fb2 = fabric_block_type(service, "FB2").await;
    assert!(fb2.processes.is_empty());
}

#[tokio::test]
async fn test_delete_resource_type_removes_consumption() {
    print_test_header(
        "test_delete_resource_type_removes_consumption",
        &["Processes lose the consumption rows of a deleted resource"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let water = service
        .list_resource_types()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.name == "water")
        .unwrap();

    service.delete_resource_type(water.id).await.unwrap();

    let washing = service
        .list_process_types()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.name == "washing")
        .unwrap();
    let names: Vec<&str> = washing
        .resources
        .iter()
        .map(|r| r.resource_name.as_str())
        .collect();
    assert_eq!(names, vec!["electricity"]);
}

#[tokio::test]
async fn test_recipe_replacement_is_persisted() {
    print_test_header(
        "test_recipe_replacement_is_persisted",
        &["Setting a recipe replaces every stored row of that garment"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let skirt = garment_id(service, "Skirt").await;
    let fb2 = fabric_block_type(service, "FB2").await;

    service
        .set_garment_recipe(NewGarmentRecipe {
            garment_type_id: skirt,
            fabric_blocks: vec![RequirementInput {
                type_id: fb2.id,
                amount: 4,
            }],
            processes: vec![],
        })
        .await
        .unwrap();

    let recipe = service.garment_recipe(skirt).await.unwrap();
    assert_eq!(recipe.fabric_blocks.len(), 1);
    assert_eq!(recipe.fabric_blocks[0].amount, 4);
    assert!(recipe.processes.is_empty());

    // the other garment is untouched
    let crop_top = garment_id(service, "Crop Top").await;
    assert_eq!(service.garment_recipe(crop_top).await.unwrap().processes.len(), 2);
}

#[tokio::test]
async fn test_duplicate_names_conflict_against_storage() {
    print_test_header(
        "test_duplicate_names_conflict_against_storage",
        &["Seeded names cannot be created twice"],
    );

    let db = seeded(MockLca::new()).await;
    let err = db.service.create_garment_type("Skirt").await.unwrap_err();
    assert!(matches!(err, EmissionsError::Conflict { .. }));

    let created = db.service.create_garment_type("Jacket").await.unwrap();
    let recipe = db.service.garment_recipe(created.id).await.unwrap();
    assert!(recipe.fabric_blocks.is_empty());
}

#[tokio::test]
async fn test_inventory_item_round_trip() {
    print_test_header(
        "test_inventory_item_round_trip",
        &["Items keep their location and preparations; deleting removes both"],
    );

    let db = seeded(MockLca::new()).await;
    let service = &db.service;
    let fb2 = fabric_block_type(service, "FB2").await;
    let washing = process_id(service, "washing").await;
    let bucharest = service
        .list_locations()
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.name == "Bucharest")
        .unwrap();

    let item = service
        .create_fabric_block(NewFabricBlockItem {
            type_id: fb2.id,
            co2eq: Some(1.25),
            garment_id: Some(7),
            location_id: Some(bucharest.id),
            preparations: vec![StepInput {
                process_id: washing,
                time: 0.5,
            }],
        })
        .await
        .unwrap();

    let listed = service.list_fabric_blocks(None).await.unwrap();
    assert_eq!(listed, vec![item.clone()]);
    assert_eq!(item.type_name, "FB2");
    assert_eq!(item.location.as_ref().map(|l| l.name.as_str()), Some("Bucharest"));
    assert_eq!(item.preparations[0].process_name, "washing");
    assert_eq!(item.garment_id, Some(7));

    service.delete_fabric_block(item.id).await.unwrap();
    assert!(service.list_fabric_blocks(None).await.unwrap().is_empty());
    assert_eq!(
        service.delete_fabric_block(item.id).await.unwrap_err(),
        EmissionsError::not_found("fabric_block", item.id)
    );
}

#[tokio::test]
async fn test_assessment_over_seeded_catalog() {
    print_test_header(
        "test_assessment_over_seeded_catalog",
        &[
            "Crop Top: 2 x FB1, 1 x FB2, sewing 1, washing 3",
            "A dyed FB1 in stock replaces the first FB1 unit",
        ],
    );

    let lca = MockLca::new()
        .with_factor(6566, 0.5)
        .with_factor(20642, 0.01)
        .with_factor(3878, 4.0)
        .with_factor(5544, 3.0);
    let db = seeded(lca).await;
    let service = &db.service;
    let fb1 = fabric_block_type(service, "FB1").await;
    let dyeing = process_id(service, "dyeing").await;

    let item = service
        .create_fabric_block(NewFabricBlockItem {
            type_id: fb1.id,
            co2eq: None,
            garment_id: None,
            location_id: None,
            preparations: vec![StepInput {
                process_id: dyeing,
                time: 2.0,
            }],
        })
        .await
        .unwrap();

    let crop_top = garment_id(service, "Crop Top").await;
    let report = service.garment_co2(crop_top).await.unwrap();

    assert_eq!(report.fabric_blocks.details.len(), 3);
    // 2 * 1.5 * 4.0 + 1.2 * 3.0
    assert_close(report.fabric_blocks.total_emission, 15.6);
    // FB1 dyed for 2: 10 * 0.01 * 2; FB2 washed for 1: 5 * 0.01 + 2 * 0.5
    assert_close(report.fabric_blocks.details[0].production_emission, 0.2);
    assert_close(report.fabric_blocks.details[2].production_emission, 1.05);
    assert_close(report.fabric_blocks.total_production_emission, 0.2 * 2.0 + 1.05);
    // sewing 1 * 0.5 + washing 3 * (5 * 0.01 + 2 * 0.5)
    assert_close(report.processes.total_emission, 3.65);

    let first = &report.fabric_blocks.details[0];
    let alt = first.alternative.as_ref().unwrap();
    assert_eq!(alt.id, item.id);
    // dyeing: 10 water per run for 2
    assert_close(alt.preparation_emission, 0.2);
    assert!(report.fabric_blocks.details[1].alternative.is_none());

    assert_eq!(report.summary.substituted_item_ids, vec![item.id]);
    assert_close(report.summary.baseline_total, 15.6 + 1.45 + 3.65);
    // first FB1 unit replaced by the dyed item; the rest keep production
    assert_close(report.summary.alternative_total, 3.65 + 0.2 + (6.0 + 0.2) + (3.6 + 1.05));
    assert_eq!(db.lca.token_calls(), 1);
}

#[tokio::test]
async fn test_module_wiring_exposes_native_client() {
    print_test_header(
        "test_module_wiring_exposes_native_client",
        &[
            "The module migrates, wires SeaORM repositories and hands out",
            "an in-process client backed by the same service",
        ],
    );

    let module = EmissionsServiceModule::default();
    assert!(module.client().is_err());
    assert!(module.register_rest(axum::Router::new()).is_err());

    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("module.db").display());
    let db = Arc::new(Database::connect(&url).await.unwrap());
    module.migrate(&db).await.unwrap();
    module
        .init_with_provider(Config::default(), db, Arc::new(MockLca::new()))
        .unwrap();

    let client = module.client().unwrap();
    let locations = client.list_locations().await.unwrap();
    assert_eq!(locations.len(), 3);

    let err = client.garment_recipe(999).await.unwrap_err();
    assert_eq!(err, EmissionsError::not_found("garment_type", 999));

    let comparison = client.repair_comparison(1.0).await.unwrap();
    assert!(comparison.scenarios.iter().all(|s| s.co2_kg.is_none()));

    assert!(module.register_rest(axum::Router::new()).is_ok());
}
