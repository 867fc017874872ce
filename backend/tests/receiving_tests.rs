//! Purchase order receiving tests
//!
//! Tests for receipt reconciliation including:
//! - Additive partial receipts and PURCHASE_RECEIPT movements
//! - Idempotent no-op when no positive delta applies
//! - Status derivation from line items, over-receipt included
//! - Catalog integrity check failing before any write

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;

use merchant_inventory_backend::error::AppError;
use merchant_inventory_backend::services::purchasing::{ReceiveLine, ReceiveRequest};
use merchant_inventory_backend::services::{CatalogService, PurchasingService};
use merchant_inventory_backend::store::{
    InventoryStore, MaterialDraft, MemoryStore, PurchaseOrderDraft, PurchaseOrderItemDraft,
};
use shared::models::{MovementType, PoStatus, PurchaseOrderItem, ReferenceType};

async fn seed_material(store: &Arc<MemoryStore>, stock: f64) -> i64 {
    let catalog = CatalogService::new(store.clone());
    catalog
        .create(MaterialDraft {
            stock_quantity: Some(stock),
            ..MaterialDraft::default()
        })
        .await
        .unwrap()
        .material_id
}

fn po_item(material_id: i64, ordered_qty: f64, price: f64) -> PurchaseOrderItemDraft {
    PurchaseOrderItemDraft {
        material_id,
        ordered_qty,
        received_qty: 0.0,
        price,
    }
}

fn receive_line(material_id: i64, received_qty: f64) -> ReceiveLine {
    ReceiveLine {
        material_id,
        received_qty,
        batch_no: None,
        expiry_date: None,
        note: None,
    }
}

fn receive(items: Vec<ReceiveLine>) -> ReceiveRequest {
    ReceiveRequest {
        items,
        received_by: Some("warehouse".to_string()),
    }
}

// ============================================================================
// Receiving
// ============================================================================

#[tokio::test]
async fn partial_receipt_updates_lines_stock_and_status() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 2.5)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    let receipt = service
        .receive(po.purchase_id, receive(vec![receive_line(beans, 4.0)]))
        .await
        .unwrap();

    assert_eq!(receipt.purchase_order.status, PoStatus::Partial);
    assert_eq!(receipt.purchase_order.items[0].received_qty, 4.0);
    assert_eq!(receipt.movements.len(), 1);

    let movement = &receipt.movements[0];
    assert_eq!(movement.movement_type, MovementType::PurchaseReceipt);
    assert_eq!(movement.quantity, 4.0);
    assert_eq!(movement.unit_cost, Some(2.5));
    assert_eq!(movement.reference_type, Some(ReferenceType::Po));
    assert_eq!(
        movement.reference_id.as_deref(),
        Some(po.purchase_id.to_string().as_str())
    );
    assert_eq!(movement.created_by.as_deref(), Some("warehouse"));

    assert_eq!(store.get_material(beans).await.unwrap().stock_quantity, 4.0);
}

#[tokio::test]
async fn receipts_are_additive_across_calls() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    service
        .receive(po.purchase_id, receive(vec![receive_line(beans, 4.0)]))
        .await
        .unwrap();
    let receipt = service
        .receive(po.purchase_id, receive(vec![receive_line(beans, 6.0)]))
        .await
        .unwrap();

    assert_eq!(receipt.purchase_order.items[0].received_qty, 10.0);
    assert_eq!(receipt.purchase_order.status, PoStatus::Received);
    assert_eq!(
        store.get_material(beans).await.unwrap().stock_quantity,
        10.0
    );
}

#[tokio::test]
async fn over_receipt_is_kept_not_clamped() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 5.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    let receipt = service
        .receive(po.purchase_id, receive(vec![receive_line(beans, 8.0)]))
        .await
        .unwrap();

    assert_eq!(receipt.purchase_order.items[0].received_qty, 8.0);
    assert_eq!(receipt.purchase_order.status, PoStatus::Received);
}

#[tokio::test]
async fn receipt_metadata_is_carried_onto_the_movement() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    let expiry = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
    let receipt = service
        .receive(
            po.purchase_id,
            receive(vec![ReceiveLine {
                material_id: beans,
                received_qty: 3.0,
                batch_no: Some("LOT-42".to_string()),
                expiry_date: Some(expiry),
                note: Some("dock B".to_string()),
            }]),
        )
        .await
        .unwrap();

    let movement = &receipt.movements[0];
    assert_eq!(movement.batch_no.as_deref(), Some("LOT-42"));
    assert_eq!(movement.expiry_date, Some(expiry));
    assert_eq!(movement.note.as_deref(), Some("dock B"));
}

#[tokio::test]
async fn concurrent_receipts_against_one_order_all_land() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 100.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = PurchasingService::new(store.clone());
        let purchase_id = po.purchase_id;
        handles.push(tokio::spawn(async move {
            service
                .receive(purchase_id, receive(vec![receive_line(beans, 1.0)]))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Every increment lands; received_qty stays consistent with the ledger
    let after = service.get(po.purchase_id).await.unwrap();
    assert_eq!(after.items[0].received_qty, 10.0);
    assert_eq!(after.status, PoStatus::Partial);
    assert_eq!(store.list_movements().await.len(), 10);
    assert_eq!(
        store.get_material(beans).await.unwrap().stock_quantity,
        10.0
    );
}

// ============================================================================
// Idempotent No-Op
// ============================================================================

#[tokio::test]
async fn receipt_without_positive_deltas_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();
    let ledger_before = store.list_movements().await.len();

    // Empty, zero, and unmatched lines are all no-ops
    for request in [
        receive(vec![]),
        receive(vec![receive_line(beans, 0.0)]),
        receive(vec![receive_line(beans + 999, 5.0)]),
    ] {
        let receipt = service.receive(po.purchase_id, request).await.unwrap();
        assert!(receipt.movements.is_empty());
        assert_eq!(receipt.purchase_order.status, PoStatus::Draft);
        assert_eq!(receipt.purchase_order.items[0].received_qty, 0.0);
    }

    assert_eq!(store.list_movements().await.len(), ledger_before);
    assert_eq!(store.get_material(beans).await.unwrap().stock_quantity, 0.0);
}

#[tokio::test]
async fn receiving_an_unknown_purchase_order_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let service = PurchasingService::new(store.clone());

    let err = service
        .receive(999, receive(vec![receive_line(1, 1.0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PurchaseNotFound(999)));
    assert_eq!(err.code(), "PURCHASE_NOT_FOUND");
}

// ============================================================================
// Catalog Integrity
// ============================================================================

#[tokio::test]
async fn receiving_a_line_for_an_uncataloged_material_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let ghost = beans + 1000;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 1.0), po_item(ghost, 5.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();
    let ledger_before = store.list_movements().await.len();

    let err = service
        .receive(
            po.purchase_id,
            receive(vec![receive_line(beans, 4.0), receive_line(ghost, 2.0)]),
        )
        .await
        .unwrap_err();

    match err {
        AppError::UnknownMaterials { material_ids } => assert_eq!(material_ids, vec![ghost]),
        other => panic!("expected UnknownMaterials, got {other:?}"),
    }

    // Zero writes, the valid line included
    assert_eq!(store.list_movements().await.len(), ledger_before);
    assert_eq!(store.get_material(beans).await.unwrap().stock_quantity, 0.0);
    let unchanged = service.get(po.purchase_id).await.unwrap();
    assert_eq!(unchanged.items[0].received_qty, 0.0);
    assert_eq!(unchanged.status, PoStatus::Draft);
}

#[tokio::test]
async fn material_deleted_after_po_creation_fails_the_whole_receipt() {
    let store = Arc::new(MemoryStore::new());
    let beans = seed_material(&store, 0.0).await;
    let milk = seed_material(&store, 0.0).await;
    let service = PurchasingService::new(store.clone());

    let po = service
        .create(PurchaseOrderDraft {
            items: vec![po_item(beans, 10.0, 1.0), po_item(milk, 5.0, 1.0)],
            ..PurchaseOrderDraft::default()
        })
        .await
        .unwrap();

    let catalog = CatalogService::new(store.clone());
    catalog.delete(milk).await.unwrap();

    let err = service
        .receive(
            po.purchase_id,
            receive(vec![receive_line(beans, 4.0), receive_line(milk, 2.0)]),
        )
        .await
        .unwrap_err();

    match err {
        AppError::UnknownMaterials { material_ids } => assert_eq!(material_ids, vec![milk]),
        other => panic!("expected UnknownMaterials, got {other:?}"),
    }
    assert!(store.list_movements().await.is_empty());
    assert_eq!(store.get_material(beans).await.unwrap().stock_quantity, 0.0);
}

// ============================================================================
// Property Tests
// ============================================================================

fn item(ordered: f64, received: f64) -> PurchaseOrderItem {
    PurchaseOrderItem {
        material_id: 1,
        ordered_qty: ordered,
        received_qty: received,
        price: 0.0,
    }
}

proptest! {
    /// A purchase order is Received exactly when every line's received
    /// quantity covers its ordered quantity
    #[test]
    fn status_derivation_matches_line_coverage(
        lines in prop::collection::vec((0.1f64..100.0, 0.0f64..150.0), 1..8),
    ) {
        let items: Vec<PurchaseOrderItem> =
            lines.iter().map(|(o, r)| item(*o, *r)).collect();
        let status = PoStatus::derive(&items);

        let all_covered = lines.iter().all(|(o, r)| r >= o);
        if all_covered {
            prop_assert_eq!(status, PoStatus::Received);
        } else {
            prop_assert_eq!(status, PoStatus::Partial);
        }
    }
}
