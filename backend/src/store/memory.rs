//! In-process implementation of the inventory store
//!
//! Materials and purchase orders live behind one mutex each: the
//! movement-append plus stock-update pair happens under the material mutex,
//! and a whole receipt happens under the order mutex, so the conservation
//! invariant and the receipt increments hold under concurrent writers while
//! operations on disjoint entities proceed independently. Same-entity
//! operations serialize in arrival order at the mutex.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use shared::models::{
    Material, Movement, MovementType, PoStatus, PurchaseOrder, ReferenceType, Supplier,
};
use shared::validation::round6;

use super::{
    ConsumeContext, ConsumeOutcome, InventoryStore, MaterialDraft, MaterialPatch, MovementDraft,
    PurchaseOrderDraft, ReceiptContext, ReceiptLine, StoreError, SupplierDraft, SupplierPatch,
};

const DEFAULT_MERCHANT_ID: i64 = 1;

pub struct MemoryStore {
    materials: RwLock<BTreeMap<i64, Arc<Mutex<Material>>>>,
    movements: RwLock<Vec<Movement>>,
    purchase_orders: RwLock<BTreeMap<i64, Arc<Mutex<PurchaseOrder>>>>,
    suppliers: RwLock<BTreeMap<i64, Supplier>>,
    next_material_id: AtomicI64,
    next_movement_id: AtomicI64,
    next_purchase_id: AtomicI64,
    next_supplier_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            materials: RwLock::new(BTreeMap::new()),
            movements: RwLock::new(Vec::new()),
            purchase_orders: RwLock::new(BTreeMap::new()),
            suppliers: RwLock::new(BTreeMap::new()),
            next_material_id: AtomicI64::new(1),
            next_movement_id: AtomicI64::new(1),
            next_purchase_id: AtomicI64::new(1),
            next_supplier_id: AtomicI64::new(1),
        }
    }

    async fn material_slot(&self, material_id: i64) -> Result<Arc<Mutex<Material>>, StoreError> {
        self.materials
            .read()
            .await
            .get(&material_id)
            .cloned()
            .ok_or(StoreError::MaterialNotFound(material_id))
    }

    async fn purchase_slot(
        &self,
        purchase_id: i64,
    ) -> Result<Arc<Mutex<PurchaseOrder>>, StoreError> {
        self.purchase_orders
            .read()
            .await
            .get(&purchase_id)
            .cloned()
            .ok_or(StoreError::PurchaseNotFound(purchase_id))
    }

    /// Builds and records a movement against an already-locked material
    async fn project_movement(&self, material: &mut Material, draft: MovementDraft) -> Movement {
        let movement_id = self.next_movement_id.fetch_add(1, Ordering::SeqCst);
        let movement = Movement {
            merchant_id: draft.merchant_id.unwrap_or(material.merchant_id),
            movement_id,
            material_id: material.material_id,
            movement_type: draft.movement_type,
            quantity: draft.quantity,
            unit_cost: draft.unit_cost,
            reference_type: draft.reference_type,
            reference_id: draft.reference_id,
            batch_no: draft.batch_no,
            expiry_date: draft.expiry_date,
            note: draft.note,
            created_by: draft.created_by,
            created_at: Utc::now(),
        };

        material.stock_quantity += movement.signed_quantity();
        material.updated_at = movement.created_at;

        self.movements.write().await.push(movement.clone());
        movement
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn insert_material(&self, draft: MaterialDraft) -> Material {
        let material_id = self.next_material_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let material = Material {
            merchant_id: draft.merchant_id.unwrap_or(DEFAULT_MERCHANT_ID),
            material_id,
            sku: draft.sku,
            name: draft
                .name
                .unwrap_or_else(|| format!("material-{}", material_id)),
            unit: draft.unit.unwrap_or_else(|| "pcs".to_string()),
            unit_precision: draft.unit_precision.unwrap_or(0),
            stock_quantity: draft.stock_quantity.unwrap_or(0.0),
            min_stock_alert: draft.min_stock_alert.unwrap_or(0.0),
            reorder_point: draft.reorder_point,
            reorder_qty: draft.reorder_qty,
            lot_tracking: draft.lot_tracking.unwrap_or(false),
            expiry_tracking: draft.expiry_tracking.unwrap_or(false),
            lead_time_days: draft.lead_time_days,
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.materials
            .write()
            .await
            .insert(material_id, Arc::new(Mutex::new(material.clone())));
        material
    }

    async fn get_material(&self, material_id: i64) -> Option<Material> {
        let slot = self.materials.read().await.get(&material_id).cloned()?;
        let material = slot.lock().await;
        Some(material.clone())
    }

    async fn list_materials(&self) -> Vec<Material> {
        let slots: Vec<Arc<Mutex<Material>>> =
            self.materials.read().await.values().cloned().collect();
        let mut materials = Vec::with_capacity(slots.len());
        for slot in slots {
            materials.push(slot.lock().await.clone());
        }
        materials
    }

    async fn update_material(
        &self,
        material_id: i64,
        patch: MaterialPatch,
    ) -> Result<Material, StoreError> {
        let slot = self.material_slot(material_id).await?;
        let mut material = slot.lock().await;

        if let Some(sku) = patch.sku {
            material.sku = Some(sku);
        }
        if let Some(name) = patch.name {
            material.name = name;
        }
        if let Some(unit) = patch.unit {
            material.unit = unit;
        }
        if let Some(unit_precision) = patch.unit_precision {
            material.unit_precision = unit_precision;
        }
        if let Some(min_stock_alert) = patch.min_stock_alert {
            material.min_stock_alert = min_stock_alert;
        }
        if let Some(reorder_point) = patch.reorder_point {
            material.reorder_point = Some(reorder_point);
        }
        if let Some(reorder_qty) = patch.reorder_qty {
            material.reorder_qty = Some(reorder_qty);
        }
        if let Some(lot_tracking) = patch.lot_tracking {
            material.lot_tracking = lot_tracking;
        }
        if let Some(expiry_tracking) = patch.expiry_tracking {
            material.expiry_tracking = expiry_tracking;
        }
        if let Some(lead_time_days) = patch.lead_time_days {
            material.lead_time_days = Some(lead_time_days);
        }
        if let Some(is_active) = patch.is_active {
            material.is_active = is_active;
        }
        material.updated_at = Utc::now();

        Ok(material.clone())
    }

    async fn delete_material(&self, material_id: i64) -> Result<(), StoreError> {
        self.materials
            .write()
            .await
            .remove(&material_id)
            .map(|_| ())
            .ok_or(StoreError::MaterialNotFound(material_id))
    }

    async fn append_movement(&self, draft: MovementDraft) -> Result<Movement, StoreError> {
        let slot = self.material_slot(draft.material_id).await?;
        let mut material = slot.lock().await;
        Ok(self.project_movement(&mut material, draft).await)
    }

    async fn consume_up_to(
        &self,
        material_id: i64,
        required: f64,
        ctx: &ConsumeContext,
    ) -> Result<ConsumeOutcome, StoreError> {
        let slot = self.material_slot(material_id).await?;
        let mut material = slot.lock().await;

        // Availability re-read inside the atomic unit; the allocator's
        // up-front shortage computation is advisory only
        let available = material.stock_quantity;
        let consumed = round6(required.min(available.max(0.0)));

        if consumed <= 0.0 {
            return Ok(ConsumeOutcome {
                movement: None,
                requested: required,
                consumed: 0.0,
                available,
            });
        }

        let draft = MovementDraft {
            merchant_id: Some(material.merchant_id),
            material_id,
            movement_type: MovementType::Consume,
            quantity: consumed,
            unit_cost: None,
            reference_type: ctx.order_id.as_ref().map(|_| ReferenceType::Order),
            reference_id: ctx.order_id.clone(),
            batch_no: None,
            expiry_date: None,
            note: Some("consume_by_order".to_string()),
            created_by: ctx.created_by.clone(),
        };
        let movement = self.project_movement(&mut material, draft).await;

        Ok(ConsumeOutcome {
            movement: Some(movement),
            requested: required,
            consumed,
            available,
        })
    }

    async fn get_movement(&self, movement_id: i64) -> Option<Movement> {
        self.movements
            .read()
            .await
            .iter()
            .find(|m| m.movement_id == movement_id)
            .cloned()
    }

    async fn list_movements(&self) -> Vec<Movement> {
        self.movements.read().await.clone()
    }

    async fn insert_purchase_order(&self, draft: PurchaseOrderDraft) -> PurchaseOrder {
        let purchase_id = self.next_purchase_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let items: Vec<_> = draft.items.into_iter().map(Into::into).collect();
        let totals = draft
            .totals
            .unwrap_or_else(|| shared::models::PoTotals::from_items(&items));
        let po = PurchaseOrder {
            merchant_id: draft.merchant_id.unwrap_or(DEFAULT_MERCHANT_ID),
            purchase_id,
            supplier_id: draft.supplier_id,
            supplier_name: draft.supplier_name,
            status: draft.status.unwrap_or(PoStatus::Draft),
            expected_date: draft.expected_date,
            currency: draft.currency.unwrap_or_else(|| "TWD".to_string()),
            totals,
            items,
            created_at: now,
            updated_at: now,
        };

        self.purchase_orders
            .write()
            .await
            .insert(purchase_id, Arc::new(Mutex::new(po.clone())));
        po
    }

    async fn get_purchase_order(&self, purchase_id: i64) -> Option<PurchaseOrder> {
        let slot = self.purchase_orders.read().await.get(&purchase_id).cloned()?;
        let po = slot.lock().await;
        Some(po.clone())
    }

    async fn list_purchase_orders(&self) -> Vec<PurchaseOrder> {
        let slots: Vec<Arc<Mutex<PurchaseOrder>>> =
            self.purchase_orders.read().await.values().cloned().collect();
        let mut orders = Vec::with_capacity(slots.len());
        for slot in slots {
            orders.push(slot.lock().await.clone());
        }
        orders
    }

    async fn put_purchase_order(&self, mut po: PurchaseOrder) -> Result<PurchaseOrder, StoreError> {
        let slot = self.purchase_slot(po.purchase_id).await?;
        let mut current = slot.lock().await;
        po.updated_at = Utc::now();
        *current = po.clone();
        Ok(po)
    }

    async fn apply_receipt(
        &self,
        purchase_id: i64,
        lines: &[ReceiptLine],
        ctx: &ReceiptContext,
    ) -> Result<(PurchaseOrder, Vec<Movement>), StoreError> {
        let slot = self.purchase_slot(purchase_id).await?;
        let mut guard = slot.lock().await;
        let po = &mut *guard;

        let deltas: HashMap<i64, &ReceiptLine> =
            lines.iter().map(|line| (line.material_id, line)).collect();

        let applicable: Vec<usize> = po
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                deltas
                    .get(&item.material_id)
                    .is_some_and(|line| line.quantity > 0.0)
            })
            .map(|(idx, _)| idx)
            .collect();

        if applicable.is_empty() {
            return Ok((po.clone(), Vec::new()));
        }

        // Every material slot is resolved before the first write, so an
        // aborted receipt leaves zero movements and a slot held here keeps
        // working even if its material is deleted mid-receipt
        let mut material_slots = Vec::with_capacity(applicable.len());
        let mut unknown = Vec::new();
        for idx in &applicable {
            let material_id = po.items[*idx].material_id;
            match self.material_slot(material_id).await {
                Ok(slot) => material_slots.push(slot),
                Err(_) => unknown.push(material_id),
            }
        }
        if !unknown.is_empty() {
            return Err(StoreError::UnknownMaterials(unknown));
        }

        let merchant_id = po.merchant_id;
        let reference_id = purchase_id.to_string();
        let mut movements = Vec::with_capacity(applicable.len());
        for (idx, material_slot) in applicable.into_iter().zip(material_slots) {
            let item = &mut po.items[idx];
            let line = deltas[&item.material_id];
            item.received_qty += line.quantity;

            let draft = MovementDraft {
                merchant_id: Some(merchant_id),
                material_id: item.material_id,
                movement_type: MovementType::PurchaseReceipt,
                quantity: line.quantity,
                unit_cost: Some(item.price),
                reference_type: Some(ReferenceType::Po),
                reference_id: Some(reference_id.clone()),
                batch_no: line.batch_no.clone(),
                expiry_date: line.expiry_date,
                note: line.note.clone(),
                created_by: ctx.received_by.clone(),
            };
            let mut material = material_slot.lock().await;
            movements.push(self.project_movement(&mut material, draft).await);
        }

        po.status = PoStatus::derive(&po.items);
        po.updated_at = Utc::now();

        Ok((po.clone(), movements))
    }

    async fn insert_supplier(&self, draft: SupplierDraft) -> Supplier {
        let supplier_id = self.next_supplier_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let supplier = Supplier {
            supplier_id,
            merchant_id: draft.merchant_id.unwrap_or(DEFAULT_MERCHANT_ID),
            name: draft
                .name
                .unwrap_or_else(|| format!("supplier-{}", supplier_id)),
            contact_name: draft.contact_name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            lead_time_days: draft.lead_time_days,
            is_active: draft.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.suppliers
            .write()
            .await
            .insert(supplier_id, supplier.clone());
        supplier
    }

    async fn get_supplier(&self, supplier_id: i64) -> Option<Supplier> {
        self.suppliers.read().await.get(&supplier_id).cloned()
    }

    async fn list_suppliers(&self) -> Vec<Supplier> {
        self.suppliers.read().await.values().cloned().collect()
    }

    async fn update_supplier(
        &self,
        supplier_id: i64,
        patch: SupplierPatch,
    ) -> Result<Supplier, StoreError> {
        let mut suppliers = self.suppliers.write().await;
        let supplier = suppliers
            .get_mut(&supplier_id)
            .ok_or(StoreError::SupplierNotFound(supplier_id))?;

        if let Some(name) = patch.name {
            supplier.name = name;
        }
        if let Some(contact_name) = patch.contact_name {
            supplier.contact_name = Some(contact_name);
        }
        if let Some(phone) = patch.phone {
            supplier.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            supplier.email = Some(email);
        }
        if let Some(address) = patch.address {
            supplier.address = Some(address);
        }
        if let Some(lead_time_days) = patch.lead_time_days {
            supplier.lead_time_days = Some(lead_time_days);
        }
        if let Some(is_active) = patch.is_active {
            supplier.is_active = is_active;
        }
        supplier.updated_at = Utc::now();

        Ok(supplier.clone())
    }

    async fn delete_supplier(&self, supplier_id: i64) -> Result<(), StoreError> {
        self.suppliers
            .write()
            .await
            .remove(&supplier_id)
            .map(|_| ())
            .ok_or(StoreError::SupplierNotFound(supplier_id))
    }
}
