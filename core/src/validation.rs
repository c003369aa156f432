//! # Recipe Creation Pipeline
//!
//! Turns an untrusted [`CreateRecipeCommand`] into a complete [`Recipe`]
//! aggregate, or rejects it with the first [`RecipeError::Validation`] found.
//!
//! The checks run in a fixed order (title, durations, ingredients, steps) and
//! stop at the first violation. On success every entity gets a fresh identity,
//! both timestamps get the same UTC instant, ingredients are ordered by name
//! and steps by step number. Nothing is persisted here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use recipebook_common::contracts::{CreateRecipeCommand, IngredientInput, StepInput};
use recipebook_common::error::{RecipeError, Result};
use recipebook_common::recipe::values::TITLE_MAX_LEN;
use recipebook_common::recipe::{
    Difficulty, Duration, Ingredient, InstructionStep, Quantity, Recipe, RecipeCategory,
    RecipeTitle, Unit,
};

pub const DESCRIPTION_MAX_LEN: usize = 4000;
pub const IMAGE_URL_MAX_LEN: usize = 2000;
pub const INGREDIENT_NAME_MAX_LEN: usize = 200;
pub const UNIT_MAX_LEN: usize = 32;
pub const STEP_TEXT_MAX_LEN: usize = 4000;

/// Validates `command` and builds the aggregate, stamped with the current time.
pub fn build_recipe(command: &CreateRecipeCommand) -> Result<Recipe> {
    build_recipe_at(command, Utc::now())
}

/// Same as [`build_recipe`] with an explicit creation instant.
pub fn build_recipe_at(command: &CreateRecipeCommand, now: DateTime<Utc>) -> Result<Recipe> {
    let title = normalize_title(&command.title)?;
    let preparation_time = minutes(command.preparation_time_minutes, "Preparation time")?;
    let cooking_time = minutes(command.cooking_time_minutes, "Cooking time")?;

    if command.ingredients.is_empty() {
        return Err(RecipeError::validation("At least one ingredient is required."));
    }
    let ingredients = command
        .ingredients
        .iter()
        .map(normalize_ingredient)
        .collect::<Result<Vec<_>>>()?;

    if command.instruction_steps.is_empty() {
        return Err(RecipeError::validation(
            "At least one instruction step is required.",
        ));
    }
    let steps = command
        .instruction_steps
        .iter()
        .map(normalize_step)
        .collect::<Result<Vec<_>>>()?;

    let description = optional_text(command.description.as_deref(), DESCRIPTION_MAX_LEN, "Description")?;
    let image_url = optional_text(command.image_url.as_deref(), IMAGE_URL_MAX_LEN, "Image reference")?;

    let recipe_id = Uuid::new_v4();

    let mut ingredients: Vec<Ingredient> = ingredients
        .into_iter()
        .map(|(name, quantity, unit)| Ingredient {
            id: Uuid::new_v4(),
            recipe_id,
            name,
            quantity,
            unit,
        })
        .collect();
    ingredients.sort_by_key(|i| i.name.to_lowercase());

    let mut instruction_steps: Vec<InstructionStep> = steps
        .into_iter()
        .map(|(step_number, text)| InstructionStep {
            id: Uuid::new_v4(),
            recipe_id,
            step_number,
            text,
        })
        .collect();
    instruction_steps.sort_by_key(|s| s.step_number);

    Ok(Recipe {
        id: recipe_id,
        title,
        description,
        image_url,
        preparation_time,
        cooking_time,
        category: RecipeCategory::from_code(command.category).unwrap_or_default(),
        difficulty: Difficulty::Unknown,
        servings: 0,
        created_at: now,
        updated_at: now,
        ingredients,
        instruction_steps,
    })
}

/// Parses a unit name against [`Unit::VALID`], case-insensitively.
///
/// Blank input, unknown names and the `Unknown` sentinel are all rejected; the
/// message for the latter two lists the accepted units.
pub fn parse_unit(raw: &str) -> Result<Unit> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RecipeError::validation("Ingredient unit is required."));
    }
    if raw.chars().count() > UNIT_MAX_LEN {
        return Err(RecipeError::validation(format!(
            "Ingredient unit must be at most {UNIT_MAX_LEN} characters."
        )));
    }

    match raw.parse::<Unit>() {
        Ok(unit) if unit != Unit::Unknown => Ok(unit),
        _ => Err(RecipeError::validation(format!(
            "Unknown unit '{raw}'. Use one of: {}",
            Unit::valid_names()
        ))),
    }
}

fn normalize_title(raw: &str) -> Result<RecipeTitle> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(RecipeError::validation("Title is required."));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(RecipeError::validation(format!(
            "Title must be at most {TITLE_MAX_LEN} characters."
        )));
    }
    Ok(RecipeTitle::new(title))
}

fn minutes(value: i32, label: &str) -> Result<Duration> {
    u32::try_from(value)
        .map(Duration::from_minutes)
        .map_err(|_| RecipeError::validation(format!("{label} cannot be negative.")))
}

fn normalize_ingredient(input: &IngredientInput) -> Result<(String, Quantity, Unit)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(RecipeError::validation("Ingredient name is required."));
    }
    if name.chars().count() > INGREDIENT_NAME_MAX_LEN {
        return Err(RecipeError::validation(format!(
            "Ingredient name must be at most {INGREDIENT_NAME_MAX_LEN} characters."
        )));
    }

    let quantity = Quantity::new(input.quantity).ok_or_else(|| {
        RecipeError::validation(format!(
            "Ingredient quantity must be greater than 0 (got {} for '{name}').",
            input.quantity
        ))
    })?;

    let unit = parse_unit(&input.unit)?;

    Ok((name.to_string(), quantity, unit))
}

fn normalize_step(input: &StepInput) -> Result<(u32, String)> {
    let step_number = u32::try_from(input.step_number)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| RecipeError::validation("StepNumber must be >= 1."))?;

    let text = input.text.trim();
    if text.is_empty() {
        return Err(RecipeError::validation("Instruction step text is required."));
    }
    if text.chars().count() > STEP_TEXT_MAX_LEN {
        return Err(RecipeError::validation(format!(
            "Instruction step text must be at most {STEP_TEXT_MAX_LEN} characters."
        )));
    }

    Ok((step_number, text.to_string()))
}

fn optional_text(raw: Option<&str>, max_len: usize, label: &str) -> Result<Option<String>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(RecipeError::validation(format!(
            "{label} must be at most {max_len} characters."
        )));
    }
    Ok(Some(value.to_string()))
}
