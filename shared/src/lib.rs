//! Shared types and models for the Merchant Inventory Service
//!
//! This crate contains the domain model shared between the backend services,
//! its storage layer, and the HTTP surface.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
