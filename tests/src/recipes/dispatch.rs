#![cfg(test)]
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use recipebook_common::error::{RecipeError, Result};
use recipebook_common::messaging::{Command, CommandHandler, Query};
use recipebook_core::recipe_bus;
use recipebook_core::storage::InMemoryRecipeRepository;
use recipebook_core::Bus;

struct ArchiveRecipe;

impl Command for ArchiveRecipe {
    type Output = ();
}

struct CountRecipes;

impl Query for CountRecipes {
    type Output = usize;
}

struct Archiver;

#[async_trait]
impl CommandHandler<ArchiveRecipe> for Archiver {
    async fn handle(&self, _command: ArchiveRecipe, _cancel: &CancellationToken) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn recipe_bus_has_no_handler_for_foreign_types() {
    let bus = recipe_bus(Arc::new(InMemoryRecipeRepository::new())).unwrap();
    let cancel = CancellationToken::new();

    let err = bus.send(ArchiveRecipe, &cancel).await.unwrap_err();
    assert!(matches!(err, RecipeError::Configuration(_)), "{err:?}");
    assert!(err.to_string().contains("ArchiveRecipe"), "{err}");

    let err = bus.query(CountRecipes, &cancel).await.unwrap_err();
    assert!(matches!(err, RecipeError::Configuration(_)), "{err:?}");
}

#[tokio::test]
async fn registered_handler_answers() {
    let bus = Bus::builder()
        .command::<ArchiveRecipe, _>(Archiver)
        .unwrap()
        .build();

    bus.send(ArchiveRecipe, &CancellationToken::new()).await.unwrap();
}
