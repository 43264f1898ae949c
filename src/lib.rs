//! AI-recipe ingestion pipeline.
//!
//! Takes the free-form, marker-delimited text a generative service produces
//! and turns it into a persisted recipe record owned by the submitting user:
//!
//! 1. [`sections::extract_sections`] splits the document into named sections.
//! 2. [`resolver::resolve_categories`] maps cuisine and meal-type names to
//!    store identifiers, tolerating misses.
//! 3. [`assembler::assemble`] combines both into a [`NewRecipe`].
//! 4. [`store::RecipeStore::save_with_owner`] writes the recipe row and its
//!    ownership link in one transaction.
//!
//! [`pipeline::RecipeIngestor`] ties the stages together behind injected
//! lookup/store handles.

pub mod assembler;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod sections;
pub mod store;

pub use crate::assembler::{assemble, DEFAULT_RECIPE_NAME};
pub use crate::config::IngestConfig;
pub use crate::error::IngestError;
pub use crate::model::NewRecipe;
pub use crate::pipeline::{GeneratedDraft, RecipeIngestor};
pub use crate::resolver::{CategoryLookup, CategoryRef, LookupPolicy, ResolvedCategories};
pub use crate::sections::{extract_sections, Section, SectionMap};
pub use crate::store::{PgRecipeStore, RecipeStore, StoreError};

/// Parse a document into an unresolved recipe draft, with no category
/// lookups and no persistence. Useful for previews and the CLI.
pub fn parse_document(document: &str, user_id: i32) -> Result<NewRecipe, IngestError> {
    if document.trim().is_empty() {
        return Err(IngestError::EmptyDocument);
    }
    let sections = sections::extract_sections(document);
    let categories = ResolvedCategories::unresolved(
        sections.get(Section::Cuisine),
        sections.get(Section::MealType),
    );
    Ok(assembler::assemble(&sections, &categories, user_id, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_rejects_empty_input() {
        assert!(matches!(
            parse_document("   \n  ", 1),
            Err(IngestError::EmptyDocument)
        ));
    }

    #[test]
    fn test_parse_document_yields_unresolved_draft() {
        let recipe = parse_document("[Name:] Toast\n[Cuisine:] French", 9).unwrap();
        assert_eq!(recipe.name, "Toast");
        assert_eq!(recipe.cuisine_id, None);
        assert_eq!(recipe.user_id, 9);
    }
}
