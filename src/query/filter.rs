use std::collections::BTreeSet;

use super::Filter;
use crate::model::{Difficulty, Recipe, RecipeId};

/// Upper bound (inclusive) in minutes for the "quick" filter
pub const QUICK_MAX_MINUTES: u32 = 30;

/// Keep the recipes matching `filter`, preserving order
pub fn apply_filter<'a>(
    recipes: &[&'a Recipe],
    filter: Filter,
    favorites: &BTreeSet<RecipeId>,
) -> Vec<&'a Recipe> {
    let keep = |recipe: &Recipe| match filter {
        Filter::All => true,
        Filter::Easy => recipe.difficulty == Difficulty::Easy,
        Filter::Medium => recipe.difficulty == Difficulty::Medium,
        Filter::Hard => recipe.difficulty == Difficulty::Hard,
        Filter::Quick => recipe.time <= QUICK_MAX_MINUTES,
        Filter::Favorites => favorites.contains(&recipe.id),
    };

    recipes.iter().copied().filter(|r| keep(r)).collect()
}
