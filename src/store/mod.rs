mod postgres;

pub use postgres::PgRecipeStore;

use crate::model::NewRecipe;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error returned by the database driver (includes pool timeouts)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store rejected or could not service the operation; used by
    /// non-SQL implementations and injected failures in tests
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable recipe storage.
///
/// Implementations must write the recipe row and its ownership link as one
/// atomic unit: both become visible together or neither does, even when the
/// caller is cancelled mid-operation.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist the recipe and its ownership link, returning the generated
    /// recipe id.
    async fn save_with_owner(&self, recipe: &NewRecipe) -> Result<i64, StoreError>;
}
