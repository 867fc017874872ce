//! Recipe (bill-of-material) wire types
//!
//! Shape of the payload returned by the external menu service at
//! `GET {base}/menu/{item_id}/recipe`.

use serde::{Deserialize, Serialize};

/// One material requirement inside a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLine {
    pub material_id: i64,
    /// Quantity per single sold item, before waste
    pub quantity: f64,
    /// Fractional waste allowance, e.g. 0.05 for 5%
    #[serde(default)]
    pub waste_factor: f64,
}

/// Extra material requirements attached to a selectable option
///
/// Overrides are additive to the base recipe, never a substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionOverride {
    pub option_id: i64,
    pub materials: Vec<RecipeLine>,
}

/// Bill of material for one sellable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub materials: Vec<RecipeLine>,
    #[serde(default)]
    pub option_overrides: Vec<OptionOverride>,
}
