use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::assembler::assemble;
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::generator::{OpenAiGenerator, RecipeGenerator};
use crate::model::NewRecipe;
use crate::resolver::{resolve_categories, CategoryLookup, LookupPolicy};
use crate::sections::{extract_sections, Section};
use crate::store::{PgRecipeStore, RecipeStore};

/// A generated recipe draft returned to the caller before saving.
///
/// Carries the raw document so the caller can resubmit it verbatim through
/// [`RecipeIngestor::ingest`] once the user decides to keep it.
#[derive(Debug, Clone)]
pub struct GeneratedDraft {
    pub document: String,
    pub recipe: NewRecipe,
}

/// The ingestion pipeline: section extraction, category resolution, recipe
/// assembly and transactional persistence behind one entry point.
///
/// Lookup and store handles are injected; requests share nothing else, so
/// the ingestor itself is freely shareable across tasks.
pub struct RecipeIngestor {
    lookup: Arc<dyn CategoryLookup>,
    store: Arc<dyn RecipeStore>,
    generator: Option<Arc<dyn RecipeGenerator>>,
    policy: LookupPolicy,
}

impl RecipeIngestor {
    pub fn new(lookup: Arc<dyn CategoryLookup>, store: Arc<dyn RecipeStore>) -> Self {
        Self {
            lookup,
            store,
            generator: None,
            policy: LookupPolicy::default(),
        }
    }

    /// Wire the ingestor from configuration: a Postgres store for lookups
    /// and persistence, plus an OpenAI generator when an API key is set.
    pub async fn from_config(config: &IngestConfig) -> Result<Self, IngestError> {
        let store = PgRecipeStore::connect(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(config.database.acquire_timeout_secs),
        )
        .await
        .map_err(IngestError::Persistence)?;

        let store = Arc::new(store);
        let mut ingestor = Self::new(store.clone(), store);

        if config.generator.api_key.is_some() || std::env::var("OPENAI_API_KEY").is_ok() {
            let generator = OpenAiGenerator::new(&config.generator)?;
            ingestor = ingestor.with_generator(Arc::new(generator));
        } else {
            debug!("No generator API key configured, generation disabled");
        }

        Ok(ingestor)
    }

    pub fn with_generator(mut self, generator: Arc<dyn RecipeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ingest one raw document for the authenticated user and return the
    /// generated recipe id.
    ///
    /// Empty documents are rejected before extraction. Unresolvable category
    /// names degrade to absent ids; persistence failures always propagate
    /// after rollback, never leaving a partial record. Resubmitting the same
    /// document creates a new, independent record.
    pub async fn ingest(
        &self,
        document: &str,
        user_id: i32,
        fallback_meal_type: Option<i32>,
    ) -> Result<i64, IngestError> {
        if document.trim().is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        let sections = extract_sections(document);
        let categories = resolve_categories(
            self.lookup.as_ref(),
            sections.get(Section::Cuisine),
            sections.get(Section::MealType),
            self.policy,
        )
        .await?;

        let recipe = assemble(&sections, &categories, user_id, fallback_meal_type);
        debug!("Assembled recipe {:?} for user {user_id}", recipe.name);

        let recipe_id = self
            .store
            .save_with_owner(&recipe)
            .await
            .map_err(IngestError::Persistence)?;

        info!("Ingested recipe {recipe_id} for user {user_id}");
        Ok(recipe_id)
    }

    /// Ask the generative service for a recipe and return the assembled
    /// draft without persisting it.
    ///
    /// The cuisine id is resolved from the request's cuisine name, not from
    /// the document's `[Cuisine:]` section; the chat flow trusts what the
    /// user asked for over what the model echoed back.
    pub async fn generate_draft(
        &self,
        cuisine: &str,
        query: &str,
        user_id: i32,
        fallback_meal_type: Option<i32>,
    ) -> Result<GeneratedDraft, IngestError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| IngestError::Generation("no generator configured".into()))?;

        let document = generator.generate(cuisine, query).await?;
        debug!("Generator produced {} bytes", document.len());

        let sections = extract_sections(&document);
        let categories = resolve_categories(
            self.lookup.as_ref(),
            cuisine,
            sections.get(Section::MealType),
            self.policy,
        )
        .await?;

        let recipe = assemble(&sections, &categories, user_id, fallback_meal_type);
        Ok(GeneratedDraft { document, recipe })
    }
}
