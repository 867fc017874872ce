//! HTTP handlers for the Merchant Inventory Service

pub mod alerts;
pub mod consumption;
pub mod health;
pub mod materials;
pub mod movements;
pub mod purchase_orders;
pub mod suppliers;

pub use alerts::*;
pub use consumption::*;
pub use health::*;
pub use materials::*;
pub use movements::*;
pub use purchase_orders::*;
pub use suppliers::*;
