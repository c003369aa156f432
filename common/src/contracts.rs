//! # Request and Result Records
//!
//! The untrusted shapes that cross the application boundary. They deserialize
//! straight from JSON so a driving adapter can hand them over unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::messaging::{Command, Query};

/// Request to create a recipe. Nothing here has been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateRecipeCommand {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub preparation_time_minutes: i32,
    pub cooking_time_minutes: i32,
    /// Category code, see [`crate::recipe::RecipeCategory::code`].
    pub category: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub ingredients: Vec<IngredientInput>,
    #[serde(deserialize_with = "null_as_empty")]
    pub instruction_steps: Vec<StepInput>,
}

/// An explicit JSON `null` collection reads as empty and is rejected later by
/// validation, the same as an omitted one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngredientInput {
    pub name: String,
    pub quantity: f64,
    /// Unit name, e.g. "Gram" or "piece".
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepInput {
    pub step_number: i32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeResult {
    pub recipe_id: Uuid,
}

impl Command for CreateRecipeCommand {
    type Output = CreateRecipeResult;
}

/// List recipes, optionally narrowed by a free-text term and a category code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetRecipeListQuery {
    pub search: Option<String>,
    pub category: Option<i32>,
}

/// Flattened, display-oriented view of one recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeOverviewItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub preparation_minutes: u32,
    pub cooking_minutes: u32,
    pub category: i32,
    pub ingredient_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRecipeListResult {
    pub items: Vec<RecipeOverviewItem>,
}

impl Query for GetRecipeListQuery {
    type Output = GetRecipeListResult;
}
