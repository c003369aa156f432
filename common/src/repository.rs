//! # Recipe Repository Port
//!
//! The storage contract the handlers depend on. Concrete stores live in the
//! `recipebook-core` crate; the core never sees how recipes are persisted.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::recipe::{Recipe, RecipeCategory};

/// Normalized list filter handed to the store.
///
/// Both fields are already cleaned up by the query handler: `search` is
/// trimmed and never blank, `category` is never [`RecipeCategory::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub category: Option<RecipeCategory>,
}

impl RecipeFilter {
    /// Applies the shared list semantics to one recipe: case-insensitive
    /// substring match on title, description or any ingredient name, and
    /// category equality.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(category) = self.category
            && recipe.category != category
        {
            return false;
        }

        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();

        recipe.title.as_str().to_lowercase().contains(&term)
            || recipe
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
            || recipe
                .ingredients
                .iter()
                .any(|i| i.name.to_lowercase().contains(&term))
    }
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persists a complete aggregate, children included.
    async fn add(&self, recipe: &Recipe, cancel: &CancellationToken) -> Result<()>;

    /// Returns the recipes matching `filter`, ordered by title ascending.
    async fn list(&self, filter: &RecipeFilter, cancel: &CancellationToken) -> Result<Vec<Recipe>>;
}
