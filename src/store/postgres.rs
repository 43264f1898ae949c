use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::model::NewRecipe;
use crate::resolver::CategoryLookup;
use crate::store::{RecipeStore, StoreError};

/// Postgres-backed lookup and recipe store.
///
/// Wraps a connection pool handle and is cheap to clone. Each operation
/// acquires one logical connection scoped to that operation; the pool's
/// acquire timeout bounds how long any call can block.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new pool against `database_url`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CategoryLookup for PgRecipeStore {
    async fn cuisine_id_by_name(&self, name: &str) -> Result<Option<i32>, StoreError> {
        // Exact, case-sensitive match; no normalization beyond what the
        // resolver already applied.
        let id = sqlx::query_scalar("SELECT id FROM cuisines WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn meal_type_id_by_name(&self, name: &str) -> Result<Option<i32>, StoreError> {
        let id = sqlx::query_scalar("SELECT id FROM mealtypes WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn save_with_owner(&self, recipe: &NewRecipe) -> Result<i64, StoreError> {
        // The transaction guard rolls back on drop unless commit is reached,
        // which covers every early-return error path and caller cancellation.
        let mut tx = self.pool.begin().await?;

        let recipe_id: i64 = sqlx::query_scalar(
            "INSERT INTO ai_generated_recipes \
             (user_id, name, ingredients, instructions, meal_type_id, cuisine_id, nutrition_facts) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(recipe.user_id)
        .bind(&recipe.name)
        .bind(&recipe.ingredients)
        .bind(&recipe.instructions)
        .bind(recipe.meal_type_id)
        .bind(recipe.cuisine_id)
        .bind(&recipe.nutrition_facts)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_saved_recipes (user_id, recipe_id) VALUES ($1, $2)")
            .bind(recipe.user_id)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Saved recipe {} for user {}", recipe_id, recipe.user_id);
        Ok(recipe_id)
    }
}
