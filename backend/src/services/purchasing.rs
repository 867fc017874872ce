//! Purchase order service
//!
//! Covers purchase-order CRUD, supplier reference data, and the receipt
//! reconciliation path: caller-supplied received deltas become
//! PURCHASE_RECEIPT movements and the PO status is re-derived from its line
//! items after every receipt.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::models::{Movement, PoStatus, PoTotals, PurchaseOrder, Supplier};
use shared::types::{paginate, Page, PageQuery};

use crate::error::{AppError, AppResult};
use crate::store::{
    InventoryStore, PurchaseOrderDraft, PurchaseOrderItemDraft, ReceiptContext, ReceiptLine,
    StoreError, SupplierDraft, SupplierPatch,
};

/// Fields accepted when updating a purchase order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseOrderUpdate {
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub status: Option<PoStatus>,
    pub expected_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub totals: Option<PoTotals>,
    pub items: Option<Vec<PurchaseOrderItemDraft>>,
}

/// One receipt line as submitted by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveLine {
    pub material_id: i64,
    #[serde(default)]
    pub received_qty: f64,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Input for receiving a purchase order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiveRequest {
    #[serde(default)]
    pub items: Vec<ReceiveLine>,
    pub received_by: Option<String>,
}

/// Result of a receipt call
#[derive(Debug, Clone, Serialize)]
pub struct ReceiveReceipt {
    pub purchase_order: PurchaseOrder,
    pub movements: Vec<Movement>,
}

/// Purchase order listed with its line count
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderListEntry {
    #[serde(flatten)]
    pub purchase_order: PurchaseOrder,
    pub items_count: usize,
}

/// Purchasing service for orders, receipts, and suppliers
#[derive(Clone)]
pub struct PurchasingService {
    store: Arc<dyn InventoryStore>,
}

impl PurchasingService {
    /// Create a new PurchasingService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Create a purchase order
    pub async fn create(&self, draft: PurchaseOrderDraft) -> AppResult<PurchaseOrder> {
        Ok(self.store.insert_purchase_order(draft).await)
    }

    /// Get a single purchase order
    pub async fn get(&self, purchase_id: i64) -> AppResult<PurchaseOrder> {
        self.store
            .get_purchase_order(purchase_id)
            .await
            .ok_or(AppError::PurchaseNotFound(purchase_id))
    }

    /// List purchase orders with their line counts
    pub async fn list(&self, query: &PageQuery) -> Page<PurchaseOrderListEntry> {
        let orders = self.store.list_purchase_orders().await;
        let page = paginate(&orders, query);
        Page {
            items: page
                .items
                .into_iter()
                .map(|po| PurchaseOrderListEntry {
                    items_count: po.items.len(),
                    purchase_order: po,
                })
                .collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }

    /// Update top-level fields and, when provided, replace the line items
    pub async fn update(
        &self,
        purchase_id: i64,
        update: PurchaseOrderUpdate,
    ) -> AppResult<PurchaseOrder> {
        let mut po = self.get(purchase_id).await?;

        if let Some(supplier_id) = update.supplier_id {
            po.supplier_id = Some(supplier_id);
        }
        if let Some(supplier_name) = update.supplier_name {
            po.supplier_name = Some(supplier_name);
        }
        if let Some(status) = update.status {
            po.status = status;
        }
        if let Some(expected_date) = update.expected_date {
            po.expected_date = Some(expected_date);
        }
        if let Some(currency) = update.currency {
            po.currency = currency;
        }
        if let Some(totals) = update.totals {
            po.totals = totals;
        }
        if let Some(items) = update.items {
            po.items = items.into_iter().map(Into::into).collect();
        }

        Ok(self.store.put_purchase_order(po).await?)
    }

    /// Receive quantities against a purchase order
    ///
    /// Deltas are keyed by material; absent or non-positive deltas are
    /// ignored, which makes a receipt call with no effective deltas an
    /// idempotent no-op: no movement, no quantity change, no status
    /// recomputation. Each positive delta increments the line's
    /// `received_qty` (additive across partial receipts, over-receipt
    /// surfaced rather than clamped) and emits one PURCHASE_RECEIPT
    /// movement carrying the batch/expiry/note metadata through. The whole
    /// receipt applies inside the store's per-order atomic unit, so
    /// concurrent receipts against the same order never lose increments.
    /// A PO line naming a material the catalog does not know is a
    /// data-integrity fault; the receipt fails before any write rather
    /// than dropping the stock update on the floor.
    pub async fn receive(
        &self,
        purchase_id: i64,
        request: ReceiveRequest,
    ) -> AppResult<ReceiveReceipt> {
        let lines: Vec<ReceiptLine> = request
            .items
            .into_iter()
            .map(|line| ReceiptLine {
                material_id: line.material_id,
                quantity: line.received_qty,
                batch_no: line.batch_no,
                expiry_date: line.expiry_date,
                note: line.note,
            })
            .collect();
        let ctx = ReceiptContext {
            received_by: request.received_by,
        };

        match self.store.apply_receipt(purchase_id, &lines, &ctx).await {
            Ok((purchase_order, movements)) => Ok(ReceiveReceipt {
                purchase_order,
                movements,
            }),
            Err(StoreError::UnknownMaterials(material_ids)) => {
                tracing::warn!(
                    purchase_id,
                    material_ids = ?material_ids,
                    "Purchase order references materials absent from the catalog"
                );
                Err(AppError::UnknownMaterials { material_ids })
            }
            Err(err) => Err(err.into()),
        }
    }

    // Suppliers

    /// Create a supplier
    pub async fn create_supplier(&self, draft: SupplierDraft) -> Supplier {
        self.store.insert_supplier(draft).await
    }

    /// Get a single supplier
    pub async fn get_supplier(&self, supplier_id: i64) -> AppResult<Supplier> {
        self.store
            .get_supplier(supplier_id)
            .await
            .ok_or(AppError::SupplierNotFound(supplier_id))
    }

    /// List suppliers
    pub async fn list_suppliers(&self, query: &PageQuery) -> Page<Supplier> {
        let suppliers = self.store.list_suppliers().await;
        paginate(&suppliers, query)
    }

    /// Update a supplier
    pub async fn update_supplier(
        &self,
        supplier_id: i64,
        patch: SupplierPatch,
    ) -> AppResult<Supplier> {
        Ok(self.store.update_supplier(supplier_id, patch).await?)
    }

    /// Delete a supplier
    pub async fn delete_supplier(&self, supplier_id: i64) -> AppResult<()> {
        Ok(self.store.delete_supplier(supplier_id).await?)
    }
}
