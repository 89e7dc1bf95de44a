//! The document the controller drives.
//!
//! A page is a tree of [`Element`]s with a few well-known ids. Only the card
//! container is required; the search input, clear button and counter are
//! optional and every operation on them is a no-op when they are absent.

use crate::dom::{has_class, has_id, Element};
use crate::query::{Filter, Sort};
use crate::render::HIDDEN_CLASS;

pub const CONTAINER_ID: &str = "recipe-container";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const CLEAR_SEARCH_ID: &str = "clear-search";
pub const COUNT_ID: &str = "recipe-count";
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
pub const SORT_BUTTON_CLASS: &str = "sort-btn";
pub const ACTIVE_CLASS: &str = "active";

// Escaped like any other text node, so no `<`, `>` or `&` in here
const STYLESHEET: &str = "\
.hidden { display: none; }
.filter-btn.active, .sort-btn.active { font-weight: bold; }
.recipe-card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.difficulty.easy { color: #2e7d32; }
.difficulty.medium { color: #ef6c00; }
.difficulty.hard { color: #c62828; }
";

#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Full page: search bar, filter and sort buttons, counter and container
    pub fn new() -> Self {
        let search = Element::new("div")
            .class("search-bar")
            .child(
                Element::new("input")
                    .attr("id", SEARCH_INPUT_ID)
                    .attr("type", "text")
                    .attr("placeholder", "Search recipes...")
                    .attr("value", ""),
            )
            .child({
                let mut clear = Element::new("button").attr("id", CLEAR_SEARCH_ID).text("✕");
                clear.set_visible(false);
                clear
            });

        let filters = Element::new("div").class("filters").children(
            Filter::ALL.iter().map(|f| {
                Element::new("button")
                    .class(FILTER_BUTTON_CLASS)
                    .attr("data-filter", f.as_str())
                    .text(f.label())
            }),
        );

        let sorts = Element::new("div").class("sorts").children(Sort::ALL.iter().map(|s| {
            Element::new("button")
                .class(SORT_BUTTON_CLASS)
                .attr("data-sort", s.as_str())
                .text(s.label())
        }));

        let root = Element::new("main")
            .class("recipe-app")
            .child(Element::new("header").child(Element::new("h1").text("Recipe Browser")))
            .child(
                Element::new("div")
                    .class("controls")
                    .child(search)
                    .child(filters)
                    .child(sorts),
            )
            .child(Element::new("p").attr("id", COUNT_ID))
            .child(Element::new("div").attr("id", CONTAINER_ID));

        Self::from_root(root)
    }

    /// Wrap an existing tree. It should contain an element with id
    /// [`CONTAINER_ID`]; everything else is optional.
    pub fn from_root(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn container(&self) -> Option<&Element> {
        self.root.find(has_id(CONTAINER_ID))
    }

    pub fn container_mut(&mut self) -> Option<&mut Element> {
        self.root.find_mut(has_id(CONTAINER_ID))
    }

    /// Replace everything inside the container
    pub fn replace_cards(&mut self, cards: Vec<Element>) {
        if let Some(container) = self.container_mut() {
            container.replace_children(cards);
        }
    }

    /// Values of all filter buttons, in document order
    pub fn filter_values(&self) -> Vec<String> {
        self.button_values(FILTER_BUTTON_CLASS, "filter")
    }

    /// Values of all sort buttons, in document order
    pub fn sort_values(&self) -> Vec<String> {
        self.button_values(SORT_BUTTON_CLASS, "sort")
    }

    fn button_values(&self, class: &str, data: &str) -> Vec<String> {
        self.root
            .find_all(has_class(class))
            .into_iter()
            .filter_map(|el| el.data(data).map(str::to_string))
            .collect()
    }

    /// Mark exactly the filter buttons whose value is `value` as active
    pub fn set_active_filter(&mut self, value: &str) {
        self.set_active(FILTER_BUTTON_CLASS, "filter", value);
    }

    pub fn set_active_sort(&mut self, value: &str) {
        self.set_active(SORT_BUTTON_CLASS, "sort", value);
    }

    fn set_active(&mut self, class: &str, data: &str, value: &str) {
        self.root.for_each_matching_mut(&has_class(class), &mut |el| {
            if el.data(data) == Some(value) {
                el.add_class(ACTIVE_CLASS);
            } else {
                el.remove_class(ACTIVE_CLASS);
            }
        });
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.active_value(FILTER_BUTTON_CLASS, "filter")
    }

    pub fn active_sort(&self) -> Option<&str> {
        self.active_value(SORT_BUTTON_CLASS, "sort")
    }

    fn active_value(&self, class: &str, data: &str) -> Option<&str> {
        self.root
            .find(|el| el.has_class(class) && el.has_class(ACTIVE_CLASS))
            .and_then(|el| el.data(data))
    }

    pub fn has_search_input(&self) -> bool {
        self.root.find(has_id(SEARCH_INPUT_ID)).is_some()
    }

    pub fn search_value(&self) -> &str {
        self.root
            .find(has_id(SEARCH_INPUT_ID))
            .and_then(|el| el.get_attr("value"))
            .unwrap_or("")
    }

    pub fn set_search_value(&mut self, value: &str) {
        if let Some(input) = self.root.find_mut(has_id(SEARCH_INPUT_ID)) {
            input.set_attr("value", value);
        }
    }

    pub fn set_clear_visible(&mut self, visible: bool) {
        if let Some(button) = self.root.find_mut(has_id(CLEAR_SEARCH_ID)) {
            button.set_visible(visible);
        }
    }

    pub fn clear_visible(&self) -> bool {
        self.root
            .find(has_id(CLEAR_SEARCH_ID))
            .is_some_and(Element::is_visible)
    }

    pub fn set_count(&mut self, text: &str) {
        if let Some(count) = self.root.find_mut(has_id(COUNT_ID)) {
            count.set_text(text);
        }
    }

    /// Counter text, if the page has a counter
    pub fn count(&self) -> Option<String> {
        self.root.find(has_id(COUNT_ID)).map(Element::text_content)
    }

    /// Standalone HTML document for the current state
    pub fn to_document(&self) -> String {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(Element::new("title").text("Recipe Browser"))
            .child(Element::new("style").text(STYLESHEET));

        let html = Element::new("html")
            .attr("lang", "en")
            .child(head)
            .child(Element::new("body").child(self.root.clone()));

        format!("<!DOCTYPE html>\n{}\n", html.to_html())
    }
}

/// Whether a detail panel is collapsed
pub fn is_collapsed(panel: &Element) -> bool {
    panel.has_class(HIDDEN_CLASS)
}
