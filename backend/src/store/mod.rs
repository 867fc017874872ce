//! Storage abstraction for the inventory ledger
//!
//! Capability set required of a backing store: read/write `Material`,
//! append-only write/read `Movement`, read/write `PurchaseOrder` and
//! `Supplier`. The algorithms in `services` depend only on this trait, so
//! the in-process `MemoryStore` can be swapped for a transactional store
//! without touching them.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use shared::models::{
    Material, Movement, MovementType, PoStatus, PoTotals, PurchaseOrder, PurchaseOrderItem,
    ReferenceType, Supplier,
};

/// Storage-level failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("material {0} not found")]
    MaterialNotFound(i64),

    #[error("purchase order {0} not found")]
    PurchaseNotFound(i64),

    #[error("supplier {0} not found")]
    SupplierNotFound(i64),

    #[error("purchase order references unknown materials {0:?}")]
    UnknownMaterials(Vec<i64>),
}

/// Fields accepted when creating a material
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialDraft {
    #[serde(default)]
    pub merchant_id: Option<i64>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_precision: Option<u32>,
    /// Opening stock; projected through an adjustment movement so the
    /// conservation invariant holds from the first ledger entry
    pub stock_quantity: Option<f64>,
    pub min_stock_alert: Option<f64>,
    pub reorder_point: Option<f64>,
    pub reorder_qty: Option<f64>,
    pub lot_tracking: Option<bool>,
    pub expiry_tracking: Option<bool>,
    pub lead_time_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Fields accepted when updating a material
///
/// `stock_quantity` is deliberately absent: stock changes only through the
/// movement ledger, never through out-of-band mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_precision: Option<u32>,
    pub min_stock_alert: Option<f64>,
    pub reorder_point: Option<f64>,
    pub reorder_qty: Option<f64>,
    pub lot_tracking: Option<bool>,
    pub expiry_tracking: Option<bool>,
    pub lead_time_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Fields accepted when recording a movement
#[derive(Debug, Clone, Deserialize)]
pub struct MovementDraft {
    #[serde(default)]
    pub merchant_id: Option<i64>,
    pub material_id: i64,
    pub movement_type: MovementType,
    pub quantity: f64,
    pub unit_cost: Option<f64>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<String>,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub created_by: Option<String>,
}

/// Consumption context for the write-time clamped consume
#[derive(Debug, Clone, Default)]
pub struct ConsumeContext {
    pub order_id: Option<String>,
    pub created_by: Option<String>,
}

/// One receipt delta to apply against a purchase order line
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub material_id: i64,
    pub quantity: f64,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Receipt context carried onto the emitted movements
#[derive(Debug, Clone, Default)]
pub struct ReceiptContext {
    pub received_by: Option<String>,
}

/// Result of a clamped consumption attempt
///
/// `available` is the availability observed at write time, inside the
/// per-material atomic unit; `consumed` is the magnitude of the emitted
/// movement, zero when nothing was consumable.
#[derive(Debug, Clone)]
pub struct ConsumeOutcome {
    pub movement: Option<Movement>,
    pub requested: f64,
    pub consumed: f64,
    pub available: f64,
}

/// Fields accepted when creating a purchase order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseOrderDraft {
    #[serde(default)]
    pub merchant_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub status: Option<PoStatus>,
    pub expected_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub totals: Option<PoTotals>,
    #[serde(default)]
    pub items: Vec<PurchaseOrderItemDraft>,
}

/// One purchase-order line as submitted by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderItemDraft {
    pub material_id: i64,
    #[serde(default)]
    pub ordered_qty: f64,
    #[serde(default)]
    pub received_qty: f64,
    #[serde(default)]
    pub price: f64,
}

impl From<PurchaseOrderItemDraft> for PurchaseOrderItem {
    fn from(draft: PurchaseOrderItemDraft) -> Self {
        PurchaseOrderItem {
            material_id: draft.material_id,
            ordered_qty: draft.ordered_qty,
            received_qty: draft.received_qty,
            price: draft.price,
        }
    }
}

/// Fields accepted when creating a supplier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierDraft {
    #[serde(default)]
    pub merchant_id: Option<i64>,
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub lead_time_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Fields accepted when updating a supplier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub lead_time_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Repository capability injected into the services
///
/// Implementations must apply the movement-append plus stock-update pair as
/// a single atomic unit per material, apply receipts as a single atomic
/// unit per purchase order, and never block operations on disjoint
/// materials or orders against each other.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    // Materials
    async fn insert_material(&self, draft: MaterialDraft) -> Material;
    async fn get_material(&self, material_id: i64) -> Option<Material>;
    async fn list_materials(&self) -> Vec<Material>;
    async fn update_material(
        &self,
        material_id: i64,
        patch: MaterialPatch,
    ) -> Result<Material, StoreError>;
    async fn delete_material(&self, material_id: i64) -> Result<(), StoreError>;

    // Movement ledger (append-only)
    /// Atomically appends a movement and applies its signed delta to the
    /// referenced material's stock. Negative resulting stock is permitted.
    async fn append_movement(&self, draft: MovementDraft) -> Result<Movement, StoreError>;
    /// Consumes up to `required` of a material, clamped to the availability
    /// observed inside the per-material atomic unit. Emits at most one
    /// CONSUME movement.
    async fn consume_up_to(
        &self,
        material_id: i64,
        required: f64,
        ctx: &ConsumeContext,
    ) -> Result<ConsumeOutcome, StoreError>;
    async fn get_movement(&self, movement_id: i64) -> Option<Movement>;
    async fn list_movements(&self) -> Vec<Movement>;

    // Purchase orders
    async fn insert_purchase_order(&self, draft: PurchaseOrderDraft) -> PurchaseOrder;
    async fn get_purchase_order(&self, purchase_id: i64) -> Option<PurchaseOrder>;
    async fn list_purchase_orders(&self) -> Vec<PurchaseOrder>;
    async fn put_purchase_order(&self, po: PurchaseOrder) -> Result<PurchaseOrder, StoreError>;
    /// Applies receipt deltas to a purchase order as one atomic unit: the
    /// line increments, the emitted PURCHASE_RECEIPT movements, and the
    /// re-derived status all become visible together, and concurrent
    /// receipts against the same order serialize rather than overwrite each
    /// other. Lines that match no order line or carry a non-positive
    /// quantity are ignored; when every line is ignored the order is
    /// returned unchanged with no movements. Fails `UnknownMaterials`
    /// before any write when an applicable line's material is absent from
    /// the catalog.
    async fn apply_receipt(
        &self,
        purchase_id: i64,
        lines: &[ReceiptLine],
        ctx: &ReceiptContext,
    ) -> Result<(PurchaseOrder, Vec<Movement>), StoreError>;

    // Suppliers
    async fn insert_supplier(&self, draft: SupplierDraft) -> Supplier;
    async fn get_supplier(&self, supplier_id: i64) -> Option<Supplier>;
    async fn list_suppliers(&self) -> Vec<Supplier>;
    async fn update_supplier(
        &self,
        supplier_id: i64,
        patch: SupplierPatch,
    ) -> Result<Supplier, StoreError>;
    async fn delete_supplier(&self, supplier_id: i64) -> Result<(), StoreError>;
}
