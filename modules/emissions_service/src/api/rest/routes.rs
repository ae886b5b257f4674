//! Route registration

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        .route("/health", get(handlers::health))
        // Assessments
        .route("/co2/repair", get(repair_comparison_handler))
        .route("/co2/{garment_type_id}", get(garment_co2_handler))
        // Catalog
        .route(
            "/garment-types",
            get(list_garment_types_handler).post(create_garment_type_handler),
        )
        .route("/garment-types/{id}", delete(delete_garment_type_handler))
        .route(
            "/fabric-block-types",
            get(list_fabric_block_types_handler).post(create_fabric_block_type_handler),
        )
        .route("/fabric-block-types/{id}", delete(delete_fabric_block_type_handler))
        .route(
            "/process-types",
            get(list_process_types_handler).post(create_process_type_handler),
        )
        .route("/process-types/{id}", delete(delete_process_type_handler))
        .route(
            "/resource-types",
            get(list_resource_types_handler).post(create_resource_type_handler),
        )
        .route("/resource-types/{id}", delete(delete_resource_type_handler))
        // Recipes
        .route("/garment-recipes", post(set_garment_recipe_handler))
        .route("/garment-recipes/{garment_type_id}", get(get_garment_recipe_handler))
        // Inventory
        .route(
            "/fabric-blocks",
            get(list_fabric_blocks_handler).post(create_fabric_block_handler),
        )
        .route("/fabric-blocks/{id}", delete(delete_fabric_block_handler))
        .route("/locations", get(list_locations_handler))
        .layer(Extension(service));

    Ok(router)
}

// ===== Handler wrappers that extract service from Extension =====

async fn garment_co2_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<Json<Co2ReportDto>, Problem> {
    handlers::garment_co2(service, path).await
}

async fn repair_comparison_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::RepairQuery>,
) -> Result<Json<RepairComparisonDto>, Problem> {
    handlers::repair_comparison(service, query).await
}

async fn list_garment_types_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<GarmentTypeDto>>, Problem> {
    handlers::list_garment_types(service).await
}

async fn create_garment_type_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateGarmentTypeRequest>,
) -> Result<(StatusCode, Json<GarmentTypeDto>), Problem> {
    handlers::create_garment_type(service, json).await
}

async fn delete_garment_type_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<StatusCode, Problem> {
    handlers::delete_garment_type(service, path).await
}

async fn list_fabric_block_types_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<FabricBlockTypeDto>>, Problem> {
    handlers::list_fabric_block_types(service).await
}

async fn create_fabric_block_type_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateFabricBlockTypeRequest>,
) -> Result<(StatusCode, Json<FabricBlockTypeDto>), Problem> {
    handlers::create_fabric_block_type(service, json).await
}

async fn delete_fabric_block_type_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<StatusCode, Problem> {
    handlers::delete_fabric_block_type(service, path).await
}

async fn list_process_types_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<ProcessTypeDto>>, Problem> {
    handlers::list_process_types(service).await
}

async fn create_process_type_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateProcessTypeRequest>,
) -> Result<(StatusCode, Json<ProcessTypeDto>), Problem> {
    handlers::create_process_type(service, json).await
}

async fn delete_process_type_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<StatusCode, Problem> {
    handlers::delete_process_type(service, path).await
}

async fn list_resource_types_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<ResourceTypeDto>>, Problem> {
    handlers::list_resource_types(service).await
}

async fn create_resource_type_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateResourceTypeRequest>,
) -> Result<(StatusCode, Json<ResourceTypeDto>), Problem> {
    handlers::create_resource_type(service, json).await
}

async fn delete_resource_type_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<StatusCode, Problem> {
    handlers::delete_resource_type(service, path).await
}

async fn get_garment_recipe_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<Json<GarmentRecipeDto>, Problem> {
    handlers::get_garment_recipe(service, path).await
}

async fn set_garment_recipe_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<SetGarmentRecipeRequest>,
) -> Result<Json<GarmentRecipeDto>, Problem> {
    handlers::set_garment_recipe(service, json).await
}

async fn list_fabric_blocks_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::FabricBlockQuery>,
) -> Result<Json<ListResponse<FabricBlockItemDto>>, Problem> {
    handlers::list_fabric_blocks(service, query).await
}

async fn create_fabric_block_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateFabricBlockRequest>,
) -> Result<(StatusCode, Json<FabricBlockItemDto>), Problem> {
    handlers::create_fabric_block(service, json).await
}

async fn delete_fabric_block_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<i64>,
) -> Result<StatusCode, Problem> {
    handlers::delete_fabric_block(service, path).await
}

async fn list_locations_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<ListResponse<LocationDto>>, Problem> {
    handlers::list_locations(service).await
}
