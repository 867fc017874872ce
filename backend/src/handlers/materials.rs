//! HTTP handlers for material catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared::models::Material;
use shared::types::{Page, PageQuery};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{created, ok, ApiResponse};
use crate::services::CatalogService;
use crate::store::{MaterialDraft, MaterialPatch};
use crate::AppState;

/// List materials
pub async fn list_materials(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Material>>>> {
    let service = CatalogService::new(state.store.clone());
    Ok(ok(request_id, service.list(&query).await))
}

/// Get a single material
pub async fn get_material(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(material_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = CatalogService::new(state.store.clone());
    Ok(ok(request_id, service.get(material_id).await?))
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(draft): Json<MaterialDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Material>>)> {
    let service = CatalogService::new(state.store.clone());
    Ok(created(request_id, service.create(draft).await?))
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(material_id): Path<i64>,
    Json(patch): Json<MaterialPatch>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = CatalogService::new(state.store.clone());
    Ok(ok(request_id, service.update(material_id, patch).await?))
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(material_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let service = CatalogService::new(state.store.clone());
    service.delete(material_id).await?;
    Ok(ok(request_id, json!({ "deleted": true })))
}
