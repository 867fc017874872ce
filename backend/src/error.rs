//! Error handling for the Merchant Inventory Service
//!
//! Every error is recovered at the request boundary into the structured
//! response envelope; upstream transport failures never leak through as raw
//! errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use shared::models::Shortage;

use crate::response::ApiErrorResponse;
use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Not-found errors
    #[error("Material {0} not found")]
    MaterialNotFound(i64),

    #[error("Movement {0} not found")]
    MovementNotFound(i64),

    #[error("Purchase order {0} not found")]
    PurchaseNotFound(i64),

    #[error("Supplier {0} not found")]
    SupplierNotFound(i64),

    /// Purchase-order lines referencing materials absent from the catalog.
    /// Surfaced to the caller instead of silently skipping the stock update.
    #[error("Unknown materials referenced: {material_ids:?}")]
    UnknownMaterials { material_ids: Vec<i64> },

    // Validation errors
    #[error("No items to consume")]
    EmptyItems,

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Business preconditions and conflicts
    #[error("Missing recipe for items: {item_ids:?}")]
    RecipeNotFound { item_ids: Vec<i64> },

    #[error("Stock is insufficient for one or more materials")]
    InsufficientStock { shortages: Vec<Shortage> },

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MaterialNotFound(id) => AppError::MaterialNotFound(id),
            StoreError::PurchaseNotFound(id) => AppError::PurchaseNotFound(id),
            StoreError::SupplierNotFound(id) => AppError::SupplierNotFound(id),
            StoreError::UnknownMaterials(material_ids) => {
                AppError::UnknownMaterials { material_ids }
            }
        }
    }
}

impl AppError {
    /// Stable machine-readable error code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MaterialNotFound(_) | AppError::UnknownMaterials { .. } => {
                "MATERIAL_NOT_FOUND"
            }
            AppError::MovementNotFound(_) => "MOVEMENT_NOT_FOUND",
            AppError::PurchaseNotFound(_) => "PURCHASE_NOT_FOUND",
            AppError::SupplierNotFound(_) => "SUPPLIER_NOT_FOUND",
            AppError::EmptyItems => "EMPTY_ITEMS",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::RecipeNotFound { .. } => "RECIPE_NOT_FOUND",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::MaterialNotFound(_)
            | AppError::MovementNotFound(_)
            | AppError::PurchaseNotFound(_)
            | AppError::SupplierNotFound(_)
            | AppError::UnknownMaterials { .. } => StatusCode::NOT_FOUND,
            AppError::EmptyItems | AppError::Validation { .. } | AppError::RecipeNotFound { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            AppError::InsufficientStock { shortages } => json!({ "shortages": shortages }),
            AppError::RecipeNotFound { item_ids } => json!({ "item_ids": item_ids }),
            AppError::UnknownMaterials { material_ids } => json!({ "material_ids": material_ids }),
            AppError::Validation { field, .. } => json!({ "field": field }),
            _ => json!({}),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ApiErrorResponse::new(self.code(), self.to_string(), self.details());
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
