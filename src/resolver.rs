use async_trait::async_trait;
use log::{debug, info, warn};

use crate::error::IngestError;
use crate::store::StoreError;

/// Name-to-id lookup capability for recipe categories.
///
/// Injected into the pipeline so resolution can run against Postgres in
/// production and in-memory fakes in tests.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    async fn cuisine_id_by_name(&self, name: &str) -> Result<Option<i32>, StoreError>;
    async fn meal_type_id_by_name(&self, name: &str) -> Result<Option<i32>, StoreError>;
}

/// A category name paired with its resolved identifier, if any.
///
/// `id: None` after a miss is a valid terminal state, not an error.
#[derive(Debug, Clone)]
pub struct CategoryRef {
    pub name: String,
    pub id: Option<i32>,
}

/// Cuisine and meal type resolved for one document.
#[derive(Debug, Clone)]
pub struct ResolvedCategories {
    pub cuisine: CategoryRef,
    pub meal_type: CategoryRef,
}

impl ResolvedCategories {
    /// Categories with no lookup performed; used when parsing without a
    /// store at hand (CLI preview).
    pub fn unresolved(cuisine: &str, meal_type: &str) -> Self {
        Self {
            cuisine: CategoryRef {
                name: cuisine.to_string(),
                id: None,
            },
            meal_type: CategoryRef {
                name: meal_type.trim().to_string(),
                id: None,
            },
        }
    }
}

/// How the resolver treats a lookup backend failure.
///
/// A miss (no matching row) is never an error under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Treat an unreachable backend like a miss: absent id, logged warning.
    /// This matches the behavior existing stored recipes were written under.
    #[default]
    Lenient,
    /// Surface backend failures to the caller as [`IngestError::Lookup`].
    Strict,
}

/// Resolve a cuisine name and a meal-type name to their identifiers.
///
/// Meal-type names are trimmed before lookup; cuisine names are matched
/// exactly, case-sensitively. Empty names skip the lookup entirely.
pub async fn resolve_categories(
    lookup: &dyn CategoryLookup,
    cuisine: &str,
    meal_type: &str,
    policy: LookupPolicy,
) -> Result<ResolvedCategories, IngestError> {
    let cuisine_id = if cuisine.is_empty() {
        None
    } else {
        settle("cuisine", cuisine, lookup.cuisine_id_by_name(cuisine).await, policy)?
    };

    let meal_type = meal_type.trim();
    let meal_type_id = if meal_type.is_empty() {
        None
    } else {
        settle(
            "meal type",
            meal_type,
            lookup.meal_type_id_by_name(meal_type).await,
            policy,
        )?
    };

    Ok(ResolvedCategories {
        cuisine: CategoryRef {
            name: cuisine.to_string(),
            id: cuisine_id,
        },
        meal_type: CategoryRef {
            name: meal_type.to_string(),
            id: meal_type_id,
        },
    })
}

fn settle(
    kind: &str,
    name: &str,
    outcome: Result<Option<i32>, StoreError>,
    policy: LookupPolicy,
) -> Result<Option<i32>, IngestError> {
    match outcome {
        Ok(Some(id)) => {
            debug!("Resolved {kind} {name:?} to id {id}");
            Ok(Some(id))
        }
        Ok(None) => {
            info!("No {kind} found matching {name:?}");
            Ok(None)
        }
        Err(err) => match policy {
            LookupPolicy::Lenient => {
                warn!("{kind} lookup for {name:?} failed, treating as a miss: {err}");
                Ok(None)
            }
            LookupPolicy::Strict => Err(IngestError::Lookup(err)),
        },
    }
}
