use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use recipebook_common::error::{RecipeError, Result};
use recipebook_common::recipe::Recipe;
use recipebook_common::repository::{RecipeFilter, RecipeRepository};

use super::sort_by_title;

/// Process-local store. Used by `--memory` runs and by tests.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn add(&self, recipe: &Recipe, cancel: &CancellationToken) -> Result<()> {
        let mut recipes = tokio::select! {
            guard = self.recipes.write() => guard,
            _ = cancel.cancelled() => return Err(RecipeError::Cancelled),
        };
        if cancel.is_cancelled() {
            return Err(RecipeError::Cancelled);
        }

        if recipes.iter().any(|r| r.id == recipe.id) {
            return Err(RecipeError::storage(anyhow::anyhow!(
                "recipe {} already exists",
                recipe.id
            )));
        }
        recipes.push(recipe.clone());
        Ok(())
    }

    async fn list(&self, filter: &RecipeFilter, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        let recipes = tokio::select! {
            guard = self.recipes.read() => guard,
            _ = cancel.cancelled() => return Err(RecipeError::Cancelled),
        };
        if cancel.is_cancelled() {
            return Err(RecipeError::Cancelled);
        }

        let mut found: Vec<Recipe> = recipes.iter().filter(|r| filter.matches(r)).cloned().collect();
        sort_by_title(&mut found);
        Ok(found)
    }
}
