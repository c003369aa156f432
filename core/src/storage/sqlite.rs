use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, Transaction, params};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use recipebook_common::error::{RecipeError, Result};
use recipebook_common::recipe::{
    Difficulty, Duration, Ingredient, InstructionStep, Quantity, Recipe, RecipeCategory,
    RecipeTitle, Unit,
};
use recipebook_common::repository::{RecipeFilter, RecipeRepository};

use super::{schema, sort_by_title};

/// SQLite-backed store.
///
/// The connection sits behind a mutex and every statement runs on the blocking
/// pool. Reads return [`RecipeError::Cancelled`] as soon as the token fires.
/// Writes check the token once more right before commit and then report what
/// actually happened: rolled back means `Cancelled`, committed means `Ok`.
#[derive(Clone)]
pub struct SqliteRecipeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecipeRepository {
    /// Opens (or creates) the database at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open recipe database {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn spawn<T, F>(&self, cancel: &CancellationToken, f: F) -> Result<JoinHandle<Result<T>>>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &CancellationToken) -> Result<T> + Send + 'static,
    {
        if cancel.is_cancelled() {
            return Err(RecipeError::Cancelled);
        }

        let conn = self.conn.clone();
        let token = cancel.clone();
        Ok(tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| RecipeError::storage(anyhow::anyhow!("recipe database lock poisoned")))?;
            f(&mut conn, &token)
        }))
    }

    /// Gives up on the result once the token fires. Only for work without side effects.
    async fn read<T, F>(&self, cancel: &CancellationToken, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &CancellationToken) -> Result<T> + Send + 'static,
    {
        let task = self.spawn(cancel, f)?;
        tokio::select! {
            joined = task => joined.map_err(RecipeError::storage)?,
            _ = cancel.cancelled() => Err(RecipeError::Cancelled),
        }
    }

    /// Always waits for `f`, so the outcome matches what was persisted.
    async fn write<T, F>(&self, cancel: &CancellationToken, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &CancellationToken) -> Result<T> + Send + 'static,
    {
        self.spawn(cancel, f)?.await.map_err(RecipeError::storage)?
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn add(&self, recipe: &Recipe, cancel: &CancellationToken) -> Result<()> {
        let recipe = recipe.clone();
        self.write(cancel, move |conn, token| {
            let tx = conn.transaction().map_err(RecipeError::storage)?;
            insert_recipe(&tx, &recipe).map_err(RecipeError::storage)?;
            // past this point the write stands even if the token fires
            if token.is_cancelled() {
                return Err(RecipeError::Cancelled);
            }
            tx.commit().map_err(RecipeError::storage)
        })
        .await
    }

    async fn list(&self, filter: &RecipeFilter, cancel: &CancellationToken) -> Result<Vec<Recipe>> {
        let filter = filter.clone();
        self.read(cancel, move |conn, _| {
            let mut recipes = load_recipes(conn, &filter).map_err(RecipeError::storage)?;
            recipes.retain(|r| filter.matches(r));
            sort_by_title(&mut recipes);
            Ok(recipes)
        })
        .await
    }
}

fn insert_recipe(tx: &Transaction, recipe: &Recipe) -> rusqlite::Result<()> {
    tx.execute(
        "INSERT INTO recipes (id, title, description, image_url, preparation_minutes,
         cooking_minutes, category, difficulty, servings, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            recipe.id.to_string(),
            recipe.title.as_str(),
            recipe.description,
            recipe.image_url,
            recipe.preparation_time.minutes(),
            recipe.cooking_time.minutes(),
            recipe.category.code(),
            recipe.difficulty.code(),
            recipe.servings,
            timestamp(&recipe.created_at),
            timestamp(&recipe.updated_at),
        ],
    )?;

    let mut insert_ingredient = tx.prepare(
        "INSERT INTO ingredients (id, recipe_id, name, quantity, unit) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for ingredient in &recipe.ingredients {
        insert_ingredient.execute(params![
            ingredient.id.to_string(),
            ingredient.recipe_id.to_string(),
            ingredient.name,
            ingredient.quantity.value(),
            ingredient.unit.name(),
        ])?;
    }

    let mut insert_step = tx.prepare(
        "INSERT INTO instruction_steps (id, recipe_id, step_number, text) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for step in &recipe.instruction_steps {
        insert_step.execute(params![
            step.id.to_string(),
            step.recipe_id.to_string(),
            step.step_number,
            step.text,
        ])?;
    }

    Ok(())
}

/// Narrows the candidates in SQL. `?1` is a category code, `?2` a `LIKE`
/// pattern; either may be NULL.
const CANDIDATES: &str = "SELECT id FROM recipes r
     WHERE (?1 IS NULL OR r.category = ?1)
       AND (?2 IS NULL
            OR r.title LIKE ?2 ESCAPE '\\'
            OR r.description LIKE ?2 ESCAPE '\\'
            OR EXISTS (SELECT 1 FROM ingredients i
                       WHERE i.recipe_id = r.id AND i.name LIKE ?2 ESCAPE '\\'))";

fn load_recipes(conn: &Connection, filter: &RecipeFilter) -> rusqlite::Result<Vec<Recipe>> {
    let category = filter.category.map(|c| c.code());
    let pattern = filter.search.as_deref().and_then(like_pattern);

    let mut stmt = conn.prepare(&format!(
        "SELECT id, title, description, image_url, preparation_minutes, cooking_minutes,
         category, difficulty, servings, created_at, updated_at
         FROM recipes WHERE id IN ({CANDIDATES})
         ORDER BY title COLLATE NOCASE, created_at"
    ))?;
    let mut recipes = stmt
        .query_map(params![category, pattern], recipe_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    // rowid keeps the order the aggregate was written in
    let mut stmt = conn.prepare(&format!(
        "SELECT id, recipe_id, name, quantity, unit FROM ingredients
         WHERE recipe_id IN ({CANDIDATES}) ORDER BY rowid"
    ))?;
    let mut ingredients: HashMap<Uuid, Vec<Ingredient>> = HashMap::new();
    for ingredient in stmt.query_map(params![category, pattern], ingredient_from_row)? {
        let ingredient = ingredient?;
        ingredients.entry(ingredient.recipe_id).or_default().push(ingredient);
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT id, recipe_id, step_number, text FROM instruction_steps
         WHERE recipe_id IN ({CANDIDATES}) ORDER BY step_number, rowid"
    ))?;
    let mut steps: HashMap<Uuid, Vec<InstructionStep>> = HashMap::new();
    for step in stmt.query_map(params![category, pattern], step_from_row)? {
        let step = step?;
        steps.entry(step.recipe_id).or_default().push(step);
    }

    for recipe in &mut recipes {
        recipe.ingredients = ingredients.remove(&recipe.id).unwrap_or_default();
        recipe.instruction_steps = steps.remove(&recipe.id).unwrap_or_default();
    }

    Ok(recipes)
}

/// `LIKE` only folds ASCII case, so non-ASCII terms skip the SQL narrowing
/// and are matched by [`RecipeFilter::matches`] alone.
fn like_pattern(term: &str) -> Option<String> {
    if !term.is_ascii() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

fn recipe_from_row(row: &Row) -> rusqlite::Result<Recipe> {
    let category_code: i32 = row.get(6)?;
    let difficulty_code: i32 = row.get(7)?;

    Ok(Recipe {
        id: uuid_column(row, 0)?,
        title: RecipeTitle::new(row.get::<_, String>(1)?),
        description: row.get(2)?,
        image_url: row.get(3)?,
        preparation_time: Duration::from_minutes(row.get(4)?),
        cooking_time: Duration::from_minutes(row.get(5)?),
        category: RecipeCategory::from_code(category_code)
            .ok_or_else(|| invalid(6, Type::Integer, format!("unknown category code {category_code}")))?,
        difficulty: Difficulty::from_code(difficulty_code)
            .ok_or_else(|| invalid(7, Type::Integer, format!("unknown difficulty code {difficulty_code}")))?,
        servings: row.get(8)?,
        created_at: timestamp_column(row, 9)?,
        updated_at: timestamp_column(row, 10)?,
        ingredients: Vec::new(),
        instruction_steps: Vec::new(),
    })
}

fn ingredient_from_row(row: &Row) -> rusqlite::Result<Ingredient> {
    let quantity: f64 = row.get(3)?;
    let unit: String = row.get(4)?;

    Ok(Ingredient {
        id: uuid_column(row, 0)?,
        recipe_id: uuid_column(row, 1)?,
        name: row.get(2)?,
        quantity: Quantity::new(quantity)
            .ok_or_else(|| invalid(3, Type::Real, format!("non-positive quantity {quantity}")))?,
        unit: unit
            .parse::<Unit>()
            .ok()
            .filter(|u| *u != Unit::Unknown)
            .ok_or_else(|| invalid(4, Type::Text, format!("unknown unit '{unit}'")))?,
    })
}

fn step_from_row(row: &Row) -> rusqlite::Result<InstructionStep> {
    Ok(InstructionStep {
        id: uuid_column(row, 0)?,
        recipe_id: uuid_column(row, 1)?,
        step_number: row.get(2)?,
        text: row.get(3)?,
    })
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn invalid(idx: usize, ty: Type, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, msg.into())
}
