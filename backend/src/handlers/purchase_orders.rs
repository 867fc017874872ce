//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use shared::models::PurchaseOrder;
use shared::types::{Page, PageQuery};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{created, ok, ApiResponse};
use crate::services::purchasing::{
    PurchaseOrderListEntry, PurchaseOrderUpdate, ReceiveReceipt, ReceiveRequest,
};
use crate::services::PurchasingService;
use crate::store::PurchaseOrderDraft;
use crate::AppState;

/// List purchase orders
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<PurchaseOrderListEntry>>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.list(&query).await))
}

/// Get a single purchase order
pub async fn get_purchase_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(purchase_id): Path<i64>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.get(purchase_id).await?))
}

/// Create a purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(draft): Json<PurchaseOrderDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<PurchaseOrder>>)> {
    let service = PurchasingService::new(state.store.clone());
    Ok(created(request_id, service.create(draft).await?))
}

/// Update a purchase order
pub async fn update_purchase_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(purchase_id): Path<i64>,
    Json(update): Json<PurchaseOrderUpdate>,
) -> AppResult<Json<ApiResponse<PurchaseOrder>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.update(purchase_id, update).await?))
}

/// Receive quantities against a purchase order
pub async fn receive_purchase_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(purchase_id): Path<i64>,
    Json(request): Json<ReceiveRequest>,
) -> AppResult<Json<ApiResponse<ReceiveReceipt>>> {
    let service = PurchasingService::new(state.store.clone());
    Ok(ok(request_id, service.receive(purchase_id, request).await?))
}
