//! # Recipe Use Cases
//!
//! One handler per request type, each depending only on the
//! [`RecipeRepository`] port.
//!
//! * [`create::CreateRecipeHandler`]: `CreateRecipeCommand -> CreateRecipeResult`
//! * [`list::GetRecipeListHandler`]: `GetRecipeListQuery -> GetRecipeListResult`

use std::sync::Arc;

use recipebook_common::contracts::{CreateRecipeCommand, GetRecipeListQuery};
use recipebook_common::error::Result;
use recipebook_common::repository::RecipeRepository;

use crate::bus::Bus;

pub mod create;
pub mod list;

pub use create::CreateRecipeHandler;
pub use list::GetRecipeListHandler;

/// Builds the dispatcher with every recipe handler wired to `repository`.
pub fn recipe_bus(repository: Arc<dyn RecipeRepository>) -> Result<Bus> {
    Ok(Bus::builder()
        .command::<CreateRecipeCommand, _>(CreateRecipeHandler::new(repository.clone()))?
        .query::<GetRecipeListQuery, _>(GetRecipeListHandler::new(repository))?
        .build())
}
