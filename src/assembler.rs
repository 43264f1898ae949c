use crate::model::NewRecipe;
use crate::resolver::ResolvedCategories;
use crate::sections::{Section, SectionMap};

/// Substituted when a document has no parseable `[Name:]` section.
pub const DEFAULT_RECIPE_NAME: &str = "Default Recipe Name";

/// Combine extracted sections and resolved category ids into a recipe.
///
/// The document's meal type takes precedence; `fallback_meal_type` (from the
/// original request parameters) only applies when the marker was absent or
/// the name did not resolve.
pub fn assemble(
    sections: &SectionMap,
    categories: &ResolvedCategories,
    user_id: i32,
    fallback_meal_type: Option<i32>,
) -> NewRecipe {
    let name = sections.get(Section::Name);
    let name = if name.is_empty() {
        DEFAULT_RECIPE_NAME.to_string()
    } else {
        name.to_string()
    };

    NewRecipe {
        name,
        cuisine_id: categories.cuisine.id,
        meal_type_id: categories.meal_type.id.or(fallback_meal_type),
        ingredients: sections.get(Section::Ingredients).to_string(),
        instructions: sections.get(Section::Instructions).to_string(),
        nutrition_facts: sections.get(Section::MacronutrientBreakdown).to_string(),
        user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::CategoryRef;
    use crate::sections::extract_sections;

    fn categories(cuisine: Option<i32>, meal_type: Option<i32>) -> ResolvedCategories {
        ResolvedCategories {
            cuisine: CategoryRef {
                name: "American".to_string(),
                id: cuisine,
            },
            meal_type: CategoryRef {
                name: "Dessert".to_string(),
                id: meal_type,
            },
        }
    }

    #[test]
    fn test_assembles_full_document() {
        let sections = extract_sections(
            "[Name:] Banana Bread\n[Ingredients:]\nBananas\nFlour\n[Instructions:]\nMix\nBake\n[Meal Type:] Dessert\n[Cuisine:] American\n[Macronutrient Breakdown:]\nCarbs: 40g",
        );
        let recipe = assemble(&sections, &categories(Some(3), Some(5)), 42, None);
        assert_eq!(recipe.name, "Banana Bread");
        assert_eq!(recipe.cuisine_id, Some(3));
        assert_eq!(recipe.meal_type_id, Some(5));
        assert_eq!(recipe.ingredients, "Bananas\nFlour");
        assert_eq!(recipe.instructions, "Mix\nBake");
        assert_eq!(recipe.nutrition_facts, "Carbs: 40g");
        assert_eq!(recipe.user_id, 42);
    }

    #[test]
    fn test_missing_name_gets_default() {
        let sections = extract_sections("[Ingredients:]\nFlour");
        let recipe = assemble(&sections, &categories(None, None), 1, None);
        assert_eq!(recipe.name, DEFAULT_RECIPE_NAME);
    }

    #[test]
    fn test_fallback_meal_type_applies_when_unresolved() {
        let sections = extract_sections("[Name:] Soup");
        let recipe = assemble(&sections, &categories(None, None), 1, Some(7));
        assert_eq!(recipe.meal_type_id, Some(7));
    }

    #[test]
    fn test_document_meal_type_takes_precedence() {
        let sections = extract_sections("[Name:] Soup\n[Meal Type:] Dinner");
        let recipe = assemble(&sections, &categories(None, Some(2)), 1, Some(7));
        assert_eq!(recipe.meal_type_id, Some(2));
    }

    #[test]
    fn test_owner_comes_from_caller_not_document() {
        let sections = extract_sections("[Name:] Sneaky\nuser_id: 999");
        let recipe = assemble(&sections, &categories(None, None), 13, None);
        assert_eq!(recipe.user_id, 13);
    }
}
