//! HTTP handlers for alerts and the inventory summary

use axum::{extract::State, Json};
use serde::Serialize;

use shared::models::Alert;

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{ok, ApiResponse};
use crate::services::alerts::InventorySummary;
use crate::services::AlertService;
use crate::AppState;

#[derive(Serialize)]
pub struct AlertList {
    pub items: Vec<Alert>,
}

/// List current low-stock alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    request_id: RequestId,
) -> AppResult<Json<ApiResponse<AlertList>>> {
    let service = AlertService::new(state.store.clone());
    Ok(ok(
        request_id,
        AlertList {
            items: service.evaluate().await,
        },
    ))
}

/// Inventory summary
pub async fn get_summary(
    State(state): State<AppState>,
    request_id: RequestId,
) -> AppResult<Json<ApiResponse<InventorySummary>>> {
    let service = AlertService::new(state.store.clone());
    Ok(ok(request_id, service.summary().await))
}
