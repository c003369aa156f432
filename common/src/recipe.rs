//! # Recipe Domain Model
//!
//! Plain entities and value objects. No IO, no behaviour beyond identity and
//! field storage.
//!
//! ## Entities
//! * [`entities::Recipe`]: The aggregate root. Exclusively owns its children.
//! * [`entities::Ingredient`]: A named, measured ingredient of one recipe.
//! * [`entities::InstructionStep`]: One numbered preparation step.
//!
//! ## Value Objects
//! * [`values::RecipeTitle`], [`values::Duration`], [`values::Quantity`]
//! * [`values::Unit`], [`values::RecipeCategory`], [`values::Difficulty`]

pub mod entities;
pub mod values;

pub use entities::{Ingredient, InstructionStep, Recipe};
pub use values::{Difficulty, Duration, Quantity, RecipeCategory, RecipeTitle, Unit};
