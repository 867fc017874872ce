//! Recipe resolver client for the external menu service
//!
//! Fetches the bill of material for a sellable item from
//! `GET {base}/menu/{item_id}/recipe`. Transport failures, timeouts, non-2xx
//! statuses and malformed bodies all collapse into the typed `Unresolved`
//! result; callers never see a raw transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use shared::models::Recipe;

use crate::config::RecipeConfig;

/// Outcome of a recipe lookup
#[derive(Debug, Clone)]
pub enum RecipeLookup {
    Resolved(Recipe),
    Unresolved,
}

/// Capability for resolving an item's bill of material
#[async_trait]
pub trait RecipeResolver: Send + Sync {
    async fn resolve(&self, item_id: i64) -> RecipeLookup;
}

/// HTTP-backed resolver against the menu service
#[derive(Clone)]
pub struct HttpRecipeResolver {
    client: Client,
    base_url: Option<String>,
}

impl HttpRecipeResolver {
    /// Create a resolver from configuration
    ///
    /// A missing base URL is equivalent to "always unresolvable".
    pub fn new(config: &RecipeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Create a resolver against a custom base URL (for testing)
    pub fn with_base_url(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: Some(base_url),
        }
    }
}

#[async_trait]
impl RecipeResolver for HttpRecipeResolver {
    async fn resolve(&self, item_id: i64) -> RecipeLookup {
        let Some(base) = &self.base_url else {
            return RecipeLookup::Unresolved;
        };

        let url = format!("{}/menu/{}/recipe", base.trim_end_matches('/'), item_id);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(item_id, error = %err, "Recipe request failed");
                return RecipeLookup::Unresolved;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(item_id, status = %response.status(), "Recipe not available");
            return RecipeLookup::Unresolved;
        }

        match response.json::<Recipe>().await {
            Ok(recipe) => RecipeLookup::Resolved(recipe),
            Err(err) => {
                tracing::warn!(item_id, error = %err, "Failed to parse recipe response");
                RecipeLookup::Unresolved
            }
        }
    }
}
