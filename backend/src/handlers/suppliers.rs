//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared::models::Supplier;
use shared::types::{Page, PageQuery};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{created, ok, ApiResponse};
use crate::services::PurchasingService;
use crate::store::{SupplierDraft, SupplierPatch};
use crate::AppState;

/// List suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Supplier>>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.list_suppliers(&query).await))
}

/// Get a single supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.get_supplier(supplier_id).await?))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(draft): Json<SupplierDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Supplier>>)> {
    let service = PurchasingService::new(state.store.clone());
    Ok(created(request_id, service.create_supplier(draft).await))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(supplier_id): Path<i64>,
    Json(patch): Json<SupplierPatch>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(
        request_id,
        service.update_supplier(supplier_id, patch).await?,
    ))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let service = PurchasingService::new(state.store.clone());
    service.delete_supplier(supplier_id).await?;
    Ok(ok(request_id, json!({ "deleted": true })))
}
