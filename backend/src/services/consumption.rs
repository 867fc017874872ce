//! Consumption allocator
//!
//! Aggregates bill-of-material requirements across an order's items and
//! options, compares the aggregate against current stock, and emits CONSUME
//! movements under the partial-fulfillment policy.
//!
//! The up-front shortage computation is advisory: it drives the
//! `allow_partial == false` abort decision but is not a reservation.
//! Concurrent orders may race on availability between the check and the
//! write, so the actual consumed quantity is re-clamped inside the store's
//! per-material atomic unit and the final shortage list is rebuilt from
//! those write-time outcomes.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use shared::models::{Movement, Recipe, RecipeLine, Shortage};
use shared::validation::{round6, validate_quantity, validate_waste_factor};

use crate::error::{AppError, AppResult};
use crate::external::recipe::{RecipeLookup, RecipeResolver};
use crate::store::{ConsumeContext, InventoryStore};

fn default_quantity() -> f64 {
    1.0
}

fn default_allow_partial() -> bool {
    true
}

/// One sold item within a consumption request
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub item_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub options: Vec<i64>,
}

/// Input for consuming stock against an order
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumeRequest {
    pub order_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default = "default_allow_partial")]
    pub allow_partial: bool,
    pub created_by: Option<String>,
}

/// Result of a consumption request
///
/// A successful response may still carry shortages: with `allow_partial`
/// that means partial fulfillment, and callers must inspect the list rather
/// than the status code alone.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumeReceipt {
    pub order_id: Option<String>,
    pub movements: Vec<Movement>,
    pub shortages: Vec<Shortage>,
}

/// Consumption service aggregating recipes into stock movements
#[derive(Clone)]
pub struct ConsumptionService {
    store: Arc<dyn InventoryStore>,
    resolver: Arc<dyn RecipeResolver>,
}

impl ConsumptionService {
    /// Create a new ConsumptionService instance
    pub fn new(store: Arc<dyn InventoryStore>, resolver: Arc<dyn RecipeResolver>) -> Self {
        Self { store, resolver }
    }

    /// Consume stock for an order under the partial-fulfillment policy
    pub async fn consume(&self, request: ConsumeRequest) -> AppResult<ConsumeReceipt> {
        if request.items.is_empty() {
            return Err(AppError::EmptyItems);
        }

        // Resolving every recipe is an all-or-nothing precondition,
        // independent of allow_partial; nothing is written before it holds
        let recipes = self.resolve_recipes(&request.items).await?;

        let required = aggregate_requirements(&request.items, &recipes);

        // Advisory availability check
        let mut availability: HashMap<i64, Option<f64>> = HashMap::new();
        for material_id in required.keys() {
            let available = self
                .store
                .get_material(*material_id)
                .await
                .map(|m| m.stock_quantity);
            availability.insert(*material_id, available);
        }

        let mut advisory: Vec<Shortage> = Vec::new();
        for (material_id, requirement) in &required {
            if *requirement <= 0.0 {
                continue;
            }
            let available = availability[material_id].unwrap_or(0.0);
            if available < *requirement {
                advisory.push(Shortage {
                    material_id: *material_id,
                    required: round6(*requirement),
                    available: round6(available),
                });
            }
        }

        if !request.allow_partial && !advisory.is_empty() {
            return Err(AppError::InsufficientStock {
                shortages: advisory,
            });
        }

        // Write phase: consume what is actually available, clamped inside
        // the per-material atomic unit
        let ctx = ConsumeContext {
            order_id: request.order_id.clone(),
            created_by: request.created_by.clone(),
        };
        let mut movements: Vec<Movement> = Vec::new();
        let mut shortages: Vec<Shortage> = Vec::new();

        for (material_id, requirement) in &required {
            if *requirement <= 0.0 {
                continue;
            }
            let rounded_requirement = round6(*requirement);

            if availability[material_id].is_none() {
                // Absent from the catalog: reported, never silently dropped
                shortages.push(Shortage {
                    material_id: *material_id,
                    required: rounded_requirement,
                    available: 0.0,
                });
                continue;
            }

            let outcome = match self
                .store
                .consume_up_to(*material_id, *requirement, &ctx)
                .await
            {
                Ok(outcome) => outcome,
                // Deleted between check and write; same as absent
                Err(_) => {
                    shortages.push(Shortage {
                        material_id: *material_id,
                        required: rounded_requirement,
                        available: 0.0,
                    });
                    continue;
                }
            };

            if let Some(movement) = outcome.movement {
                movements.push(movement);
            }
            if outcome.consumed < rounded_requirement {
                shortages.push(Shortage {
                    material_id: *material_id,
                    required: rounded_requirement,
                    available: round6(outcome.available),
                });
            }
        }

        if !shortages.is_empty() {
            tracing::warn!(
                order_id = request.order_id.as_deref().unwrap_or(""),
                shortage_count = shortages.len(),
                "Order only partially fulfilled"
            );
        }

        Ok(ConsumeReceipt {
            order_id: request.order_id,
            movements,
            shortages,
        })
    }

    /// Resolve every distinct item's recipe concurrently
    ///
    /// Timeouts, transport failures, and recipes with malformed line
    /// quantities are all indistinguishable from "not found" by design.
    async fn resolve_recipes(&self, items: &[OrderItem]) -> AppResult<HashMap<i64, Recipe>> {
        let distinct: BTreeSet<i64> = items.iter().map(|it| it.item_id).collect();

        let mut tasks = Vec::with_capacity(distinct.len());
        for item_id in distinct {
            let resolver = self.resolver.clone();
            tasks.push(tokio::spawn(async move {
                (item_id, resolver.resolve(item_id).await)
            }));
        }

        let mut recipes = HashMap::new();
        let mut missing = Vec::new();
        for task in tasks {
            let (item_id, lookup) = task
                .await
                .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))?;
            match lookup {
                RecipeLookup::Resolved(recipe) if recipe_is_well_formed(&recipe) => {
                    recipes.insert(item_id, recipe);
                }
                RecipeLookup::Resolved(_) => {
                    tracing::warn!(item_id, "Recipe carries malformed line quantities");
                    missing.push(item_id);
                }
                RecipeLookup::Unresolved => missing.push(item_id),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::RecipeNotFound { item_ids: missing });
        }
        Ok(recipes)
    }
}

/// A usable recipe has finite, non-negative quantities and waste factors on
/// every line, base and overrides alike
fn recipe_is_well_formed(recipe: &Recipe) -> bool {
    recipe
        .materials
        .iter()
        .chain(
            recipe
                .option_overrides
                .iter()
                .flat_map(|o| o.materials.iter()),
        )
        .all(|line| {
            validate_quantity(line.quantity).is_ok()
                && validate_waste_factor(line.waste_factor).is_ok()
        })
}

/// Aggregate per-material requirements across all items and their selected
/// option overrides
///
/// Accumulates in full double precision; rounding is deferred to movement
/// creation. Overrides are additive to the base recipe.
fn aggregate_requirements(
    items: &[OrderItem],
    recipes: &HashMap<i64, Recipe>,
) -> BTreeMap<i64, f64> {
    let mut required: BTreeMap<i64, f64> = BTreeMap::new();

    for item in items {
        let Some(recipe) = recipes.get(&item.item_id) else {
            continue;
        };
        accumulate(&mut required, &recipe.materials, item.quantity);

        let selected: BTreeSet<i64> = item.options.iter().copied().collect();
        for overrides in &recipe.option_overrides {
            if selected.contains(&overrides.option_id) {
                accumulate(&mut required, &overrides.materials, item.quantity);
            }
        }
    }

    required
}

fn accumulate(required: &mut BTreeMap<i64, f64>, lines: &[RecipeLine], factor: f64) {
    for line in lines {
        let need = line.quantity * factor * (1.0 + line.waste_factor);
        *required.entry(line.material_id).or_insert(0.0) += need;
    }
}
