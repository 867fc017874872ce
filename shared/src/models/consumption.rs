//! Consumption result models

use serde::{Deserialize, Serialize};

/// A material whose availability could not cover its aggregated requirement
///
/// Quantities are reported rounded to 6 decimal places. A shortage in a
/// successful response means the order was only partially fulfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub material_id: i64,
    pub required: f64,
    pub available: f64,
}
