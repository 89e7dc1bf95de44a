//! Recipe cards and their detail lists as document nodes.

use std::collections::BTreeSet;

use crate::dom::Element;
use crate::model::{Recipe, RecipeId, Step};

pub const CARD_CLASS: &str = "recipe-card";
pub const FAVORITE_BUTTON_CLASS: &str = "favorite-btn";
pub const STEPS_TOGGLE_CLASS: &str = "toggle-steps";
pub const INGREDIENTS_TOGGLE_CLASS: &str = "toggle-ingredients";
pub const STEPS_PANEL_CLASS: &str = "steps";
pub const INGREDIENTS_PANEL_CLASS: &str = "ingredients";
pub const HIDDEN_CLASS: &str = "hidden";

pub const SHOW_STEPS: &str = "Show Steps";
pub const HIDE_STEPS: &str = "Hide Steps";
pub const SHOW_INGREDIENTS: &str = "Show Ingredients";
pub const HIDE_INGREDIENTS: &str = "Hide Ingredients";

pub const FAVORITE_GLYPH: &str = "❤️";
pub const NOT_FAVORITE_GLYPH: &str = "🤍";

/// One self-contained card. Both detail panels start collapsed and empty.
pub fn render_card(recipe: &Recipe, is_favorite: bool) -> Element {
    let glyph = if is_favorite {
        FAVORITE_GLYPH
    } else {
        NOT_FAVORITE_GLYPH
    };

    Element::new("div")
        .class(CARD_CLASS)
        .attr("data-id", recipe.id.to_string())
        .child(
            Element::new("button")
                .class(FAVORITE_BUTTON_CLASS)
                .attr("data-id", recipe.id.to_string())
                .text(glyph),
        )
        .child(Element::new("h3").text(recipe.title.as_str()))
        .child(
            Element::new("div")
                .class("recipe-meta")
                .child(Element::new("span").text(format!("{} mins", recipe.time)))
                .child(
                    Element::new("span")
                        .class("difficulty")
                        .class(recipe.difficulty.as_str())
                        .text(recipe.difficulty.as_str()),
                ),
        )
        .child(Element::new("p").text(recipe.description.as_str()))
        .child(
            Element::new("button")
                .class(STEPS_TOGGLE_CLASS)
                .text(SHOW_STEPS),
        )
        .child(
            Element::new("button")
                .class(INGREDIENTS_TOGGLE_CLASS)
                .text(SHOW_INGREDIENTS),
        )
        .child(
            Element::new("div")
                .class(STEPS_PANEL_CLASS)
                .class(HIDDEN_CLASS),
        )
        .child(
            Element::new("div")
                .class(INGREDIENTS_PANEL_CLASS)
                .class(HIDDEN_CLASS),
        )
}

/// Nested list of steps.
///
/// A leaf is a single item. A group is an item labelled with its title,
/// followed by its substeps as a nested list; groups without substeps get no
/// nested list.
pub fn render_steps(steps: &[Step]) -> Element {
    Element::new("ul").children(steps.iter().map(render_step))
}

fn render_step(step: &Step) -> Element {
    let item = Element::new("li").text(step.label());
    match step {
        Step::Group { substeps, .. } if !substeps.is_empty() => item.child(render_steps(substeps)),
        _ => item,
    }
}

/// Flat list, one item per ingredient, in order
pub fn render_ingredients(ingredients: &[String]) -> Element {
    Element::new("ul").children(
        ingredients
            .iter()
            .map(|i| Element::new("li").text(i.as_str())),
    )
}

/// Cards for every recipe, in the given order
pub fn render_cards(recipes: &[&Recipe], favorites: &BTreeSet<RecipeId>) -> Vec<Element> {
    recipes
        .iter()
        .map(|r| render_card(r, favorites.contains(&r.id)))
        .collect()
}

pub fn count_text(shown: usize, total: usize) -> String {
    format!("Showing {} of {} recipes", shown, total)
}
