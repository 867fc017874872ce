//! Material catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw material tracked by the stock ledger
///
/// `stock_quantity` is derived state: it always equals the signed sum of
/// every movement referencing this material since creation, and is mutated
/// only through the stock projector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub merchant_id: i64,
    pub material_id: i64,
    pub sku: Option<String>,
    pub name: String,
    /// Stocking unit, e.g. "g", "ml", "pcs"
    pub unit: String,
    /// Number of decimal places meaningful for this unit
    pub unit_precision: u32,
    /// Derived current stock; may legitimately go negative
    pub stock_quantity: f64,
    /// Low-stock alert threshold; 0 disables alerting
    pub min_stock_alert: f64,
    pub reorder_point: Option<f64>,
    pub reorder_qty: Option<f64>,
    pub lot_tracking: bool,
    pub expiry_tracking: bool,
    pub lead_time_days: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
