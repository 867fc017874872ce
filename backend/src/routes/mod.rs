//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::AppState;

/// All `/api/v1` routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/materials", material_routes())
        .nest("/movements", movement_routes())
        .nest("/purchase-orders", purchase_order_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/inventory", inventory_routes())
        .route("/alerts", get(handlers::list_alerts))
        .route("/summary", get(handlers::get_summary))
}

fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
}

fn movement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_movements).post(handlers::create_movement),
        )
        .route("/:movement_id", get(handlers::get_movement))
}

fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route(
            "/:purchase_id",
            get(handlers::get_purchase_order).put(handlers::update_purchase_order),
        )
        .route(
            "/:purchase_id/receive",
            post(handlers::receive_purchase_order),
        )
}

fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
}

fn inventory_routes() -> Router<AppState> {
    Router::new().route("/consume", post(handlers::consume_by_order))
}
