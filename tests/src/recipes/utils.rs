use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use recipebook_common::contracts::{CreateRecipeCommand, IngredientInput, StepInput};
use recipebook_common::error::{RecipeError, Result};
use recipebook_common::recipe::Recipe;
use recipebook_common::repository::{RecipeFilter, RecipeRepository};
use recipebook_core::storage::{InMemoryRecipeRepository, SqliteRecipeRepository};

/// One store under test. The temp dir lives as long as the store does.
pub struct Store {
    pub name: &'static str,
    pub repository: Arc<dyn RecipeRepository>,
    _dir: Option<TempDir>,
}

pub fn stores() -> Vec<Store> {
    let dir = TempDir::new().unwrap();
    let sqlite = SqliteRecipeRepository::open(dir.path().join("recipes.db")).unwrap();

    vec![
        Store {
            name: "memory",
            repository: Arc::new(InMemoryRecipeRepository::new()),
            _dir: None,
        },
        Store {
            name: "sqlite",
            repository: Arc::new(sqlite),
            _dir: Some(dir),
        },
    ]
}

pub fn ingredient(name: &str, quantity: f64, unit: &str) -> IngredientInput {
    IngredientInput {
        name: name.into(),
        quantity,
        unit: unit.into(),
    }
}

pub fn step(step_number: i32, text: &str) -> StepInput {
    StepInput {
        step_number,
        text: text.into(),
    }
}

pub fn pasta() -> CreateRecipeCommand {
    CreateRecipeCommand {
        title: "Pasta".into(),
        preparation_time_minutes: 10,
        ingredients: vec![ingredient("Pasta", 200.0, "Gram")],
        instruction_steps: vec![step(1, "Boil")],
        ..Default::default()
    }
}

pub fn request(title: &str, category: i32, ingredients: &[&str]) -> CreateRecipeCommand {
    CreateRecipeCommand {
        title: title.into(),
        description: Some(format!("A recipe for {title}")),
        preparation_time_minutes: 15,
        cooking_time_minutes: 30,
        category,
        ingredients: ingredients.iter().map(|n| ingredient(n, 1.0, "Piece")).collect(),
        instruction_steps: vec![step(1, "Cook it")],
        ..Default::default()
    }
}

/// A store that is always down.
pub struct UnreachableStore;

#[async_trait]
impl RecipeRepository for UnreachableStore {
    async fn add(&self, _recipe: &Recipe, _cancel: &CancellationToken) -> Result<()> {
        Err(RecipeError::storage(anyhow::anyhow!("connection refused")))
    }

    async fn list(&self, _filter: &RecipeFilter, _cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        Err(RecipeError::storage(anyhow::anyhow!("connection refused")))
    }
}
