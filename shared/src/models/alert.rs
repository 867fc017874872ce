//! Stock alert models
//!
//! Alerts are ephemeral and derived: every evaluation recomputes them from
//! the current material state, so nothing here is ever persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Material;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    LowStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Warn,
}

/// A derived stock alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Deterministic function of material id and alert type, not an
    /// allocated counter
    pub alert_id: String,
    pub material_id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub threshold: f64,
    pub current_value: f64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Low-stock alert for a material currently below its threshold
    pub fn low_stock(material: &Material, now: DateTime<Utc>) -> Alert {
        Alert {
            alert_id: format!("LOW-{}", material.material_id),
            material_id: material.material_id,
            alert_type: AlertType::LowStock,
            severity: AlertSeverity::Warn,
            threshold: material.min_stock_alert,
            current_value: material.stock_quantity,
            message: format!("{} is below its minimum stock level", material.name),
            created_at: now,
        }
    }
}
