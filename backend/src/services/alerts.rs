//! Alert evaluation and inventory summary
//!
//! Alerts are derived fresh on every evaluation from current material state.
//! There is no stored alert state, no deduplication window, and no
//! hysteresis: a material oscillating around its threshold appears and
//! disappears on successive evaluations.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use shared::models::{Alert, Material, MovementType};

use crate::store::InventoryStore;

/// Aggregated inventory overview
#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub materials_low_stock_count: u64,
    pub total_skus: u64,
    pub total_stock_value: f64,
    pub movements_last_7d: u64,
}

fn is_low_stock(material: &Material) -> bool {
    material.is_active
        && material.min_stock_alert > 0.0
        && material.stock_quantity < material.min_stock_alert
}

/// Alert service deriving low-stock alerts and summary figures
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn InventoryStore>,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Evaluate low-stock alerts against the current catalog
    pub async fn evaluate(&self) -> Vec<Alert> {
        let now = Utc::now();
        self.store
            .list_materials()
            .await
            .iter()
            .filter(|m| is_low_stock(m))
            .map(|m| Alert::low_stock(m, now))
            .collect()
    }

    /// Inventory summary across the catalog and the recent ledger
    pub async fn summary(&self) -> InventorySummary {
        let materials = self.store.list_materials().await;
        let movements = self.store.list_movements().await;

        let low = materials.iter().filter(|m| is_low_stock(m)).count() as u64;

        // Stock valued at the latest receipt cost per material; materials
        // never received count as zero
        let mut latest_cost: HashMap<i64, f64> = HashMap::new();
        for movement in &movements {
            if movement.movement_type == MovementType::PurchaseReceipt {
                if let Some(cost) = movement.unit_cost {
                    latest_cost.insert(movement.material_id, cost);
                }
            }
        }
        let total_stock_value: f64 = materials
            .iter()
            .map(|m| {
                m.stock_quantity.max(0.0) * latest_cost.get(&m.material_id).copied().unwrap_or(0.0)
            })
            .sum();

        let cutoff = Utc::now() - Duration::days(7);
        let movements_last_7d = movements.iter().filter(|m| m.created_at >= cutoff).count() as u64;

        InventorySummary {
            materials_low_stock_count: low,
            total_skus: materials.len() as u64,
            total_stock_value,
            movements_last_7d,
        }
    }
}
