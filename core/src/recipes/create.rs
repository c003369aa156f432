use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use recipebook_common::contracts::{CreateRecipeCommand, CreateRecipeResult};
use recipebook_common::error::Result;
use recipebook_common::messaging::CommandHandler;
use recipebook_common::repository::RecipeRepository;

use crate::validation;

/// Validates a creation request and stores the resulting aggregate.
///
/// Validation and storage failures reach the caller unchanged; there is no
/// retry and nothing to undo, since the store writes the aggregate atomically.
pub struct CreateRecipeHandler {
    repository: Arc<dyn RecipeRepository>,
}

impl CreateRecipeHandler {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<CreateRecipeCommand> for CreateRecipeHandler {
    async fn handle(
        &self,
        command: CreateRecipeCommand,
        cancel: &CancellationToken,
    ) -> Result<CreateRecipeResult> {
        let recipe = validation::build_recipe(&command)?;

        self.repository.add(&recipe, cancel).await?;

        info!(
            recipe_id = %recipe.id,
            ingredients = recipe.ingredients.len(),
            steps = recipe.instruction_steps.len(),
            "stored recipe '{}'",
            recipe.title
        );
        Ok(CreateRecipeResult {
            recipe_id: recipe.id,
        })
    }
}
