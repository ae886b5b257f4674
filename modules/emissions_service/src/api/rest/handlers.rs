//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ===== Assessment Handlers =====

/// CO2eq breakdown of a garment type, with alternative sourcing applied
pub async fn garment_co2(
    service: Arc<Service>,
    Path(garment_type_id): Path<i64>,
) -> Result<Json<Co2ReportDto>, Problem> {
    let report = service
        .garment_co2(garment_type_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(report.into()))
}

#[derive(Debug, Deserialize)]
pub struct RepairQuery {
    /// Textile mass shipped for repair
    #[serde(default = "default_repair_mass")]
    pub amount_kg: f64,
}

fn default_repair_mass() -> f64 {
    1.0
}

pub async fn repair_comparison(
    service: Arc<Service>,
    Query(query): Query<RepairQuery>,
) -> Result<Json<RepairComparisonDto>, Problem> {
    let comparison = service
        .repair_comparison(query.amount_kg)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(comparison.into()))
}

// ===== Garment Type Handlers =====

pub async fn list_garment_types(
    service: Arc<Service>,
) -> Result<Json<ListResponse<GarmentTypeDto>>, Problem> {
    let types = service.list_garment_types().await.map_err(map_domain_error)?;
    Ok(Json(into_list(types)))
}

pub async fn create_garment_type(
    service: Arc<Service>,
    Json(req): Json<CreateGarmentTypeRequest>,
) -> Result<(StatusCode, Json<GarmentTypeDto>), Problem> {
    let created = service
        .create_garment_type(&req.name)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_garment_type(
    service: Arc<Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_garment_type(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Fabric Block Type Handlers =====

pub async fn list_fabric_block_types(
    service: Arc<Service>,
) -> Result<Json<ListResponse<FabricBlockTypeDto>>, Problem> {
    let types = service
        .list_fabric_block_types()
        .await
        .map_err(map_domain_error)?;
    Ok(Json(into_list(types)))
}

pub async fn create_fabric_block_type(
    service: Arc<Service>,
    Json(req): Json<CreateFabricBlockTypeRequest>,
) -> Result<(StatusCode, Json<FabricBlockTypeDto>), Problem> {
    let created = service
        .create_fabric_block_type(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete a fabric block type, its recipe rows and its inventory
pub async fn delete_fabric_block_type(
    service: Arc<Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_fabric_block_type(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Process Type Handlers =====

pub async fn list_process_types(
    service: Arc<Service>,
) -> Result<Json<ListResponse<ProcessTypeDto>>, Problem> {
    let types = service.list_process_types().await.map_err(map_domain_error)?;
    Ok(Json(into_list(types)))
}

pub async fn create_process_type(
    service: Arc<Service>,
    Json(req): Json<CreateProcessTypeRequest>,
) -> Result<(StatusCode, Json<ProcessTypeDto>), Problem> {
    let created = service
        .create_process_type(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_process_type(
    service: Arc<Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_process_type(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Resource Type Handlers =====

pub async fn list_resource_types(
    service: Arc<Service>,
) -> Result<Json<ListResponse<ResourceTypeDto>>, Problem> {
    let types = service.list_resource_types().await.map_err(map_domain_error)?;
    Ok(Json(into_list(types)))
}

pub async fn create_resource_type(
    service: Arc<Service>,
    Json(req): Json<CreateResourceTypeRequest>,
) -> Result<(StatusCode, Json<ResourceTypeDto>), Problem> {
    let created = service
        .create_resource_type(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_resource_type(
    service: Arc<Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_resource_type(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Recipe Handlers =====

pub async fn get_garment_recipe(
    service: Arc<Service>,
    Path(garment_type_id): Path<i64>,
) -> Result<Json<GarmentRecipeDto>, Problem> {
    let recipe = service
        .garment_recipe(garment_type_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(recipe.into()))
}

pub async fn set_garment_recipe(
    service: Arc<Service>,
    Json(req): Json<SetGarmentRecipeRequest>,
) -> Result<Json<GarmentRecipeDto>, Problem> {
    let recipe = service
        .set_garment_recipe(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(recipe.into()))
}

// ===== Inventory Handlers =====

#[derive(Debug, Deserialize)]
pub struct FabricBlockQuery {
    pub type_id: Option<i64>,
}

pub async fn list_fabric_blocks(
    service: Arc<Service>,
    Query(query): Query<FabricBlockQuery>,
) -> Result<Json<ListResponse<FabricBlockItemDto>>, Problem> {
    let items = service
        .list_fabric_blocks(query.type_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(into_list(items)))
}

pub async fn create_fabric_block(
    service: Arc<Service>,
    Json(req): Json<CreateFabricBlockRequest>,
) -> Result<(StatusCode, Json<FabricBlockItemDto>), Problem> {
    let created = service
        .create_fabric_block(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_fabric_block(
    service: Arc<Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_fabric_block(id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_locations(
    service: Arc<Service>,
) -> Result<Json<ListResponse<LocationDto>>, Problem> {
    let locations = service.list_locations().await.map_err(map_domain_error)?;
    Ok(Json(into_list(locations)))
}

fn into_list<M, D: From<M>>(models: Vec<M>) -> ListResponse<D> {
    models.into_iter().map(D::from).collect::<Vec<_>>().into()
}
