use serde::Serialize;

/// A recipe assembled from a parsed document, ready to be persisted.
///
/// `user_id` always comes from the authenticated caller, never from the
/// document content. Category ids are `None` when the name had no matching
/// row in the store; a recipe with unresolved categories is still valid.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipe {
    pub name: String,
    pub cuisine_id: Option<i32>,
    pub meal_type_id: Option<i32>,
    pub ingredients: String,
    pub instructions: String,
    pub nutrition_facts: String,
    pub user_id: i32,
}
