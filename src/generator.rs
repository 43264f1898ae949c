use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::error::IngestError;

/// The meal types the model is allowed to emit in `[Meal Type:]`.
const MEAL_TYPE_OPTIONS: &str = "Breakfast, Lunch, Dinner, Dessert, Snack, Bread, Pastry, Other";

/// Build the system prompt that pins the model to the marker contract.
///
/// The marker vocabulary here is versioned together with
/// [`crate::sections::Section`]; changing one without the other breaks
/// extraction of every new document.
pub fn build_system_prompt(cuisine: &str) -> String {
    format!(
        "You are a chatbot specialized in {cuisine} cuisine. Provide a recipe that includes \
         the following details clearly separated and marked: name of the dish within \"[Name:]\", \
         list of ingredients within \"[Ingredients:]\", step-by-step instructions within \
         \"[Instructions:]\", type of meal within \"[Meal Type:]\" using exactly one of the \
         options {MEAL_TYPE_OPTIONS}, cuisine type within \"[Cuisine:]\", and macronutrient \
         breakdown within \"[Macronutrient Breakdown:]\". Ensure each section is separated by \
         line breaks for easy parsing."
    )
}

/// A service that turns a user's request into a marker-delimited recipe
/// document.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(&self, cuisine: &str, query: &str) -> Result<String, IngestError>;
}

/// OpenAI chat-completions backed generator.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    /// Create a generator from configuration.
    ///
    /// The API key is taken from the config first, then from the
    /// `OPENAI_API_KEY` environment variable.
    pub fn new(config: &GeneratorConfig) -> Result<Self, IngestError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                IngestError::Generation("OPENAI_API_KEY not found in config or environment".into())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAiGenerator {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAiGenerator {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl RecipeGenerator for OpenAiGenerator {
    async fn generate(&self, cuisine: &str, query: &str) -> Result<String, IngestError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": build_system_prompt(cuisine)},
                    {"role": "user", "content": query}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let body: Value = response.json().await?;
        debug!("{:?}", body);

        let document = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                IngestError::Generation("completion payload had no message content".into())
            })?
            .to_string();

        Ok(document)
    }
}
