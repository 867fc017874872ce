//! Business logic services for the Merchant Inventory Service

pub mod alerts;
pub mod catalog;
pub mod consumption;
pub mod ledger;
pub mod purchasing;

pub use alerts::AlertService;
pub use catalog::CatalogService;
pub use consumption::ConsumptionService;
pub use ledger::LedgerService;
pub use purchasing::PurchasingService;
