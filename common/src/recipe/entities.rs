use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipe::values::{Difficulty, Duration, Quantity, RecipeCategory, RecipeTitle, Unit};

/// Aggregate root: a recipe together with its ingredients and steps.
///
/// `ingredients` is kept ordered by name and `instruction_steps` by step
/// number; every child carries the id of the owning recipe in `recipe_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub title: RecipeTitle,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub preparation_time: Duration,
    pub cooking_time: Duration,
    pub category: RecipeCategory,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ingredients: Vec<Ingredient>,
    pub instruction_steps: Vec<InstructionStep>,
}

impl Recipe {
    /// Ingredient names in alphabetical order (case-insensitive).
    pub fn ingredient_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ingredients.iter().map(|i| i.name.clone()).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub quantity: Quantity,
    pub unit: Unit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub step_number: u32,
    pub text: String,
}
