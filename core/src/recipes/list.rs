use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use recipebook_common::contracts::{GetRecipeListQuery, GetRecipeListResult, RecipeOverviewItem};
use recipebook_common::error::Result;
use recipebook_common::messaging::QueryHandler;
use recipebook_common::recipe::{Recipe, RecipeCategory};
use recipebook_common::repository::{RecipeFilter, RecipeRepository};

/// Read side: filters through the repository and flattens each recipe into a
/// [`RecipeOverviewItem`]. Ordering is whatever the repository returns.
pub struct GetRecipeListHandler {
    repository: Arc<dyn RecipeRepository>,
}

impl GetRecipeListHandler {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<GetRecipeListQuery> for GetRecipeListHandler {
    async fn handle(
        &self,
        query: GetRecipeListQuery,
        cancel: &CancellationToken,
    ) -> Result<GetRecipeListResult> {
        let filter = to_filter(&query);
        if let Some(code) = query.category
            && RecipeCategory::from_code(code).is_none()
        {
            warn!("ignoring category filter {code}: not a known category");
        }
        debug!(?filter, "listing recipes");

        let recipes = self.repository.list(&filter, cancel).await?;

        Ok(GetRecipeListResult {
            items: recipes.iter().map(to_overview_item).collect(),
        })
    }
}

/// Blank search terms and unrecognized or `Unknown` category codes mean
/// "no filter"; neither is an error.
pub fn to_filter(query: &GetRecipeListQuery) -> RecipeFilter {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let category = query
        .category
        .and_then(RecipeCategory::from_code)
        .filter(|c| *c != RecipeCategory::Unknown);

    RecipeFilter { search, category }
}

fn to_overview_item(recipe: &Recipe) -> RecipeOverviewItem {
    RecipeOverviewItem {
        id: recipe.id,
        title: recipe.title.to_string(),
        description: recipe.description.clone(),
        image_url: recipe.image_url.clone(),
        preparation_minutes: recipe.preparation_time.minutes(),
        cooking_minutes: recipe.cooking_time.minutes(),
        category: recipe.category.code(),
        ingredient_names: recipe.ingredient_names(),
    }
}
