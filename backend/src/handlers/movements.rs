//! HTTP handlers for movement ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared::models::Movement;
use shared::types::{Page, PageQuery};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{created, ok, ApiResponse};
use crate::services::LedgerService;
use crate::store::MovementDraft;
use crate::AppState;

/// List movements
pub async fn list_movements(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Movement>>>> {
    let service = LedgerService::new(state.store.clone());
    Ok(ok(request_id, service.list(&query).await))
}

/// Get a single movement
pub async fn get_movement(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(movement_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Movement>>> {
    let service = LedgerService::new(state.store.clone());
    Ok(ok(request_id, service.get(movement_id).await?))
}

/// Record a movement
pub async fn create_movement(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(draft): Json<MovementDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Movement>>)> {
    let service = LedgerService::new(state.store.clone());
    Ok(created(request_id, service.record(draft).await?))
}
