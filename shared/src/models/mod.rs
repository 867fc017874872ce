//! Domain models for the Merchant Inventory Service

mod alert;
mod consumption;
mod material;
mod movement;
mod purchase;
mod recipe;
mod supplier;

pub use alert::*;
pub use consumption::*;
pub use material::*;
pub use movement::*;
pub use purchase::*;
pub use recipe::*;
pub use supplier::*;
