//! Supplier reference models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supplier of raw materials
///
/// Plain reference data; suppliers take no part in the ledger invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub lead_time_days: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
