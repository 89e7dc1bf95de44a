use crate::model::Recipe;

/// Keep recipes whose title, description or any ingredient contains `query`,
/// ignoring case. A blank query keeps everything.
pub fn filter_by_search<'a>(recipes: &[&'a Recipe], query: &str) -> Vec<&'a Recipe> {
    if query.trim().is_empty() {
        return recipes.to_vec();
    }

    let needle = query.to_lowercase();
    recipes
        .iter()
        .copied()
        .filter(|recipe| matches(recipe, &needle))
        .collect()
}

fn matches(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(needle))
}
