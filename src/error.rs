use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while ingesting a generated recipe document
#[derive(Error, Debug)]
pub enum IngestError {
    /// No recipe text was provided; rejected before extraction begins
    #[error("No recipe text provided")]
    EmptyDocument,

    /// A category lookup could not reach the store (strict policy only;
    /// the lenient policy degrades this to an absent identifier)
    #[error("Category lookup failed: {0}")]
    Lookup(#[source] StoreError),

    /// The transactional write failed; the transaction was rolled back
    /// and no partial state remains
    #[error("Failed to save recipe: {0}")]
    Persistence(#[source] StoreError),

    /// The generative service returned an unusable payload or is not configured
    #[error("Recipe generation failed: {0}")]
    Generation(String),

    /// HTTP failure talking to the generative service
    #[error("Generator request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
