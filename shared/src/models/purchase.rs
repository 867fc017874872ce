//! Purchase order models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Purchase order lifecycle status
///
/// Derived, never stored as an independent state machine: after every
/// receipt the status is recomputed from the line items alone. Receipts only
/// ever add quantity, so the status never regresses to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoStatus {
    Draft,
    Partial,
    Received,
}

impl PoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoStatus::Draft => "DRAFT",
            PoStatus::Partial => "PARTIAL",
            PoStatus::Received => "RECEIVED",
        }
    }

    /// Pure re-derivation of status from ordered vs. received quantities
    pub fn derive(items: &[PurchaseOrderItem]) -> PoStatus {
        if items.iter().all(|it| it.received_qty >= it.ordered_qty) {
            PoStatus::Received
        } else {
            PoStatus::Partial
        }
    }
}

/// One line of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub material_id: i64,
    pub ordered_qty: f64,
    /// Monotonically non-decreasing; over-receipt is permitted and surfaced,
    /// never clamped
    pub received_qty: f64,
    pub price: f64,
}

/// Monetary totals of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
}

impl PoTotals {
    /// Totals derived from line items when the caller supplies none
    pub fn from_items(items: &[PurchaseOrderItem]) -> PoTotals {
        let subtotal: f64 = items.iter().map(|it| it.ordered_qty * it.price).sum();
        PoTotals {
            subtotal,
            tax: 0.0,
            shipping: 0.0,
            discount: 0.0,
            total: subtotal,
        }
    }
}

/// A purchase order against a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub merchant_id: i64,
    pub purchase_id: i64,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub status: PoStatus,
    pub expected_date: Option<NaiveDate>,
    pub currency: String,
    pub totals: PoTotals,
    pub items: Vec<PurchaseOrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
