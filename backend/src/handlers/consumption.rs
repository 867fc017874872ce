//! HTTP handler for recipe-driven order consumption

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::RequestId;
use crate::response::{ok, ApiResponse};
use crate::services::consumption::{ConsumeReceipt, ConsumeRequest};
use crate::services::ConsumptionService;
use crate::AppState;

/// Consume stock for an order
///
/// A 200 response with a non-empty shortage list is a partial fulfillment,
/// not an error; callers must inspect the shortages.
pub async fn consume_by_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<ConsumeRequest>,
) -> AppResult<Json<ApiResponse<ConsumeReceipt>>> {
    let service = ConsumptionService::new(state.store.clone(), state.resolver.clone());
    Ok(ok(request_id, service.consume(request).await?))
}
