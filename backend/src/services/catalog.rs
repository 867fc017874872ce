//! Material catalog service

use std::sync::Arc;

use shared::models::{Material, MovementType};
use shared::types::{paginate, Page, PageQuery};
use shared::validation::validate_unit_precision;

use crate::error::{AppError, AppResult};
use crate::store::{InventoryStore, MaterialDraft, MaterialPatch, MovementDraft};

/// Catalog service for material reference data
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn InventoryStore>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Create a material
    ///
    /// Opening stock is projected through an adjustment movement rather than
    /// written directly, so the conservation invariant holds from the first
    /// ledger entry.
    pub async fn create(&self, mut draft: MaterialDraft) -> AppResult<Material> {
        if let Some(precision) = draft.unit_precision {
            validate_unit_precision(precision).map_err(|message| AppError::Validation {
                field: "unit_precision".to_string(),
                message: message.to_string(),
            })?;
        }

        let opening_stock = draft.stock_quantity.take().unwrap_or(0.0);
        let material = self.store.insert_material(draft).await;

        if opening_stock == 0.0 {
            return Ok(material);
        }

        let movement_type = if opening_stock > 0.0 {
            MovementType::AdjustUp
        } else {
            MovementType::AdjustDown
        };
        self.store
            .append_movement(MovementDraft {
                merchant_id: Some(material.merchant_id),
                material_id: material.material_id,
                movement_type,
                quantity: opening_stock.abs(),
                unit_cost: None,
                reference_type: None,
                reference_id: None,
                batch_no: None,
                expiry_date: None,
                note: Some("opening stock".to_string()),
                created_by: None,
            })
            .await?;

        self.get(material.material_id).await
    }

    /// Get a single material
    pub async fn get(&self, material_id: i64) -> AppResult<Material> {
        self.store
            .get_material(material_id)
            .await
            .ok_or(AppError::MaterialNotFound(material_id))
    }

    /// List materials ordered by id
    pub async fn list(&self, query: &PageQuery) -> Page<Material> {
        let materials = self.store.list_materials().await;
        paginate(&materials, query)
    }

    /// Update material reference fields
    ///
    /// Stock is not updatable here; it changes only through the ledger.
    pub async fn update(&self, material_id: i64, patch: MaterialPatch) -> AppResult<Material> {
        if let Some(precision) = patch.unit_precision {
            validate_unit_precision(precision).map_err(|message| AppError::Validation {
                field: "unit_precision".to_string(),
                message: message.to_string(),
            })?;
        }

        Ok(self.store.update_material(material_id, patch).await?)
    }

    /// Delete a material
    pub async fn delete(&self, material_id: i64) -> AppResult<()> {
        Ok(self.store.delete_material(material_id).await?)
    }
}
