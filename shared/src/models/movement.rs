//! Stock movement models
//!
//! Movements form an append-only ledger: every stock-affecting event is
//! recorded exactly once and never updated or deleted afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a stock movement
///
/// The type alone determines the sign applied to the movement's magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    PurchaseReceipt,
    AdjustUp,
    TransferIn,
    Consume,
    Waste,
    AdjustDown,
    Return,
    TransferOut,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::PurchaseReceipt => "PURCHASE_RECEIPT",
            MovementType::AdjustUp => "ADJUST_UP",
            MovementType::TransferIn => "TRANSFER_IN",
            MovementType::Consume => "CONSUME",
            MovementType::Waste => "WASTE",
            MovementType::AdjustDown => "ADJUST_DOWN",
            MovementType::Return => "RETURN",
            MovementType::TransferOut => "TRANSFER_OUT",
        }
    }

    /// Sign applied to the movement magnitude when projecting stock
    pub fn sign(&self) -> f64 {
        match self {
            MovementType::PurchaseReceipt | MovementType::AdjustUp | MovementType::TransferIn => {
                1.0
            }
            MovementType::Consume
            | MovementType::Waste
            | MovementType::AdjustDown
            | MovementType::Return
            | MovementType::TransferOut => -1.0,
        }
    }
}

/// Entity a movement originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    #[serde(rename = "PO")]
    Po,
    #[serde(rename = "ORDER")]
    Order,
}

/// One immutable entry in the stock ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub merchant_id: i64,
    /// Unique, monotonically assigned ledger id
    pub movement_id: i64,
    pub material_id: i64,
    pub movement_type: MovementType,
    /// Non-negative magnitude; the sign comes from `movement_type`
    pub quantity: f64,
    pub unit_cost: Option<f64>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<String>,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Movement {
    /// Signed stock delta contributed by this movement
    pub fn signed_quantity(&self) -> f64 {
        self.movement_type.sign() * self.quantity
    }
}
