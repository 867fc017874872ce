//! External API integrations

pub mod recipe;

pub use recipe::{HttpRecipeResolver, RecipeLookup, RecipeResolver};
