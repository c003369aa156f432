//! # Storage Adapters
//!
//! Implementations of [`RecipeRepository`](recipebook_common::repository::RecipeRepository).
//!
//! * **[`memory`]**: A process-local store behind an async `RwLock`.
//! * **[`sqlite`]**: A durable store; each aggregate is written in one transaction.
//! * **[`schema`]**: Versioned SQLite migrations.
//!
//! Both stores filter through [`RecipeFilter::matches`](recipebook_common::repository::RecipeFilter::matches)
//! and order through [`sort_by_title`], so a query gives the same answer
//! whichever one is wired in.

use recipebook_common::recipe::Recipe;

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::InMemoryRecipeRepository;
pub use sqlite::SqliteRecipeRepository;

/// Title ascending, case-insensitive. Ties go to the older recipe.
pub(crate) fn sort_by_title(recipes: &mut [Recipe]) {
    recipes.sort_by_cached_key(|r| (r.title.as_str().to_lowercase(), r.created_at));
}
