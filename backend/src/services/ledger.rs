//! Movement ledger service (stock projector)
//!
//! The sole write path for stock changes: each recorded movement appends one
//! immutable ledger entry and applies its signed delta to the material's
//! cached quantity inside the store's per-material atomic unit. The ledger
//! is not a stock-sufficiency gate; negative resulting stock is permitted
//! and surfaced through alerts and shortage reporting.

use std::sync::Arc;

use shared::models::Movement;
use shared::types::{paginate, Page, PageQuery};
use shared::validation::validate_quantity;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, MovementDraft};

/// Ledger service for recording and reading stock movements
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn InventoryStore>,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Record a stock movement
    pub async fn record(&self, draft: MovementDraft) -> AppResult<Movement> {
        validate_quantity(draft.quantity).map_err(|message| AppError::Validation {
            field: "quantity".to_string(),
            message: message.to_string(),
        })?;

        let movement = self.store.append_movement(draft).await?;

        tracing::debug!(
            movement_id = movement.movement_id,
            material_id = movement.material_id,
            movement_type = movement.movement_type.as_str(),
            quantity = movement.quantity,
            "Recorded movement"
        );

        Ok(movement)
    }

    /// Get a single movement
    pub async fn get(&self, movement_id: i64) -> AppResult<Movement> {
        self.store
            .get_movement(movement_id)
            .await
            .ok_or(AppError::MovementNotFound(movement_id))
    }

    /// List movements, oldest first
    pub async fn list(&self, query: &PageQuery) -> Page<Movement> {
        let movements = self.store.list_movements().await;
        paginate(&movements, query)
    }
}
