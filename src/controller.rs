//! Interaction controller: turns discrete user events into state changes and
//! page updates.
//!
//! The controller is the only mutator of the UI state and the favorites. It
//! never sleeps or spawns; time-based work (the search debounce) is requested
//! through [`Effect`]s that the runtime carries out and reports back as
//! [`Event::SearchSettled`].

use std::time::Duration;

use log::{debug, error, info};

use crate::catalog::Catalog;
use crate::config::BrowserConfig;
use crate::dom::{has_class, Element};
use crate::favorites::{FavoritesStore, DEFAULT_FAVORITES_KEY};
use crate::model::{Recipe, RecipeId};
use crate::page::{is_collapsed, Page};
use crate::query::{self, Filter, Query, Sort};
use crate::render::{
    count_text, render_cards, render_ingredients, render_steps, CARD_CLASS,
    FAVORITE_BUTTON_CLASS, HIDDEN_CLASS, HIDE_INGREDIENTS, HIDE_STEPS, INGREDIENTS_PANEL_CLASS,
    INGREDIENTS_TOGGLE_CLASS, SHOW_INGREDIENTS, SHOW_STEPS, STEPS_PANEL_CLASS, STEPS_TOGGLE_CLASS,
};
use crate::storage::KeyValueStore;

/// Quiet period before typed search text is applied
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A filter button carrying this value was clicked
    FilterClicked(String),
    /// A sort button carrying this value was clicked
    SortClicked(String),
    /// The raw search input changed
    SearchInput(String),
    /// The debounce timer armed for `generation` fired
    SearchSettled { generation: u64 },
    /// The clear-search button was clicked
    ClearSearch,
    /// Click somewhere in the card container; `path` leads from the
    /// container to the clicked element
    CardClick { path: Vec<usize> },
}

/// Work the controller asks its runtime to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)arm the debounce timer, replacing any pending one, and send
    /// `Event::SearchSettled { generation }` once `delay` has passed
    ScheduleSearch { generation: u64, delay: Duration },
    /// Drop the pending debounce timer, if any
    CancelSearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    generation: u64,
    value: String,
}

/// Which detail panel a disclosure button controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Steps,
    Ingredients,
}

impl Panel {
    fn class(self) -> &'static str {
        match self {
            Panel::Steps => STEPS_PANEL_CLASS,
            Panel::Ingredients => INGREDIENTS_PANEL_CLASS,
        }
    }

    fn labels(self) -> (&'static str, &'static str) {
        match self {
            Panel::Steps => (SHOW_STEPS, HIDE_STEPS),
            Panel::Ingredients => (SHOW_INGREDIENTS, HIDE_INGREDIENTS),
        }
    }

    fn render(self, recipe: &Recipe) -> Element {
        match self {
            Panel::Steps => render_steps(&recipe.steps),
            Panel::Ingredients => render_ingredients(&recipe.ingredients),
        }
    }
}

/// Builder for [`RecipeBrowser`]
#[derive(Debug)]
pub struct RecipeBrowserBuilder<S> {
    store: S,
    catalog: Catalog,
    page: Page,
    favorites_key: String,
    debounce: Duration,
}

impl<S: KeyValueStore> RecipeBrowserBuilder<S> {
    /// Use a different catalog than the builtin one
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Drive an existing page instead of a freshly built one
    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn favorites_key(mut self, key: impl Into<String>) -> Self {
        self.favorites_key = key.into();
        self
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Take the favorites key and debounce delay from a loaded configuration
    pub fn config(self, config: &BrowserConfig) -> Self {
        self.favorites_key(config.favorites_key.clone())
            .debounce(Duration::from_millis(config.debounce_ms))
    }

    /// Hydrate favorites, render the initial view and return the browser
    pub fn build(self) -> RecipeBrowser<S> {
        let favorites = FavoritesStore::load_with_key(self.store, self.favorites_key);
        let mut browser = RecipeBrowser {
            catalog: self.catalog,
            state: Query::default(),
            favorites,
            page: self.page,
            debounce: self.debounce,
            pending: None,
            next_generation: 0,
        };
        let shown = browser.refresh();
        info!(
            "recipe browser ready: showing {} of {} recipes",
            shown,
            browser.catalog.len()
        );
        browser
    }
}

/// A catalog, its UI state and favorites, and the page showing them
#[derive(Debug)]
pub struct RecipeBrowser<S> {
    catalog: Catalog,
    state: Query,
    favorites: FavoritesStore<S>,
    page: Page,
    debounce: Duration,
    pending: Option<PendingSearch>,
    next_generation: u64,
}

impl<S: KeyValueStore> RecipeBrowser<S> {
    /// Start building a browser whose favorites live in `store`
    ///
    /// # Example
    /// ```
    /// use recipe_browser::{MemoryStore, RecipeBrowser};
    ///
    /// let browser = RecipeBrowser::builder(MemoryStore::new()).build();
    /// assert_eq!(browser.visible_ids().len(), 8);
    /// ```
    pub fn builder(store: S) -> RecipeBrowserBuilder<S> {
        RecipeBrowserBuilder {
            store,
            catalog: Catalog::builtin(),
            page: Page::new(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Apply one event. Returned effects must be carried out by the caller.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::FilterClicked(value) => {
                self.state.filter = Filter::from_value(&value);
                self.refresh();
                Vec::new()
            }
            Event::SortClicked(value) => {
                self.state.sort = Sort::from_value(&value);
                self.refresh();
                Vec::new()
            }
            Event::SearchInput(value) => self.on_search_input(value),
            Event::SearchSettled { generation } => {
                self.on_search_settled(generation);
                Vec::new()
            }
            Event::ClearSearch => self.on_clear_search(),
            Event::CardClick { path } => {
                self.on_card_click(&path);
                Vec::new()
            }
        }
    }

    fn on_search_input(&mut self, value: String) -> Vec<Effect> {
        // The clear affordance follows the raw input right away
        self.page.set_search_value(&value);
        self.page.set_clear_visible(!value.is_empty());

        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending = Some(PendingSearch { generation, value });

        vec![Effect::ScheduleSearch {
            generation,
            delay: self.debounce,
        }]
    }

    fn on_search_settled(&mut self, generation: u64) {
        match self.pending.take() {
            Some(pending) if pending.generation == generation => {
                debug!("applying search {:?}", pending.value);
                self.state.search = pending.value;
                self.refresh();
            }
            other => {
                debug!("ignoring stale search timer {}", generation);
                self.pending = other;
            }
        }
    }

    fn on_clear_search(&mut self) -> Vec<Effect> {
        self.page.set_search_value("");
        self.page.set_clear_visible(false);
        self.pending = None;
        self.state.search.clear();
        self.refresh();
        vec![Effect::CancelSearch]
    }

    /// Apply search text right away, skipping the debounce. Meant for text
    /// that arrives whole (a command-line flag) rather than per keystroke.
    pub fn submit_search(&mut self, text: &str) -> Vec<Effect> {
        self.page.set_search_value(text);
        self.page.set_clear_visible(!text.is_empty());
        let had_pending = self.pending.take().is_some();
        self.state.search = text.to_string();
        self.refresh();

        if had_pending {
            vec![Effect::CancelSearch]
        } else {
            Vec::new()
        }
    }

    fn on_card_click(&mut self, path: &[usize]) {
        let Some(container) = self.page.container() else {
            return;
        };
        let Some(card_path) = container.closest(path, has_class(CARD_CLASS)) else {
            return;
        };
        let Some(id) = container
            .node_at(&card_path)
            .and_then(|card| card.data("id"))
            .and_then(|id| id.parse::<RecipeId>().ok())
        else {
            debug!("card without a usable id at {:?}", card_path);
            return;
        };
        let Some(target) = container.node_at(path) else {
            return;
        };

        if target.has_class(FAVORITE_BUTTON_CLASS) {
            self.toggle_favorite(id);
        } else if target.has_class(STEPS_TOGGLE_CLASS) {
            self.toggle_panel(id, &card_path, &path[card_path.len()..], Panel::Steps);
        } else if target.has_class(INGREDIENTS_TOGGLE_CLASS) {
            self.toggle_panel(id, &card_path, &path[card_path.len()..], Panel::Ingredients);
        }
    }

    /// Flip favorite status of `id` and re-render. A failed write is logged;
    /// the in-memory change stands.
    pub fn toggle_favorite(&mut self, id: RecipeId) {
        if let Err(e) = self.favorites.toggle(id) {
            error!("failed to persist favorites: {}", e);
        }
        self.refresh();
    }

    /// Expand or collapse one panel of one card in place. The rest of the
    /// page is untouched.
    fn toggle_panel(
        &mut self,
        id: RecipeId,
        card_path: &[usize],
        button_path: &[usize],
        panel: Panel,
    ) {
        let Some(recipe) = self.catalog.get(id) else {
            debug!("no recipe {} in catalog, ignoring toggle", id);
            return;
        };
        let Some(card) = self
            .page
            .container_mut()
            .and_then(|container| container.node_at_mut(card_path))
        else {
            return;
        };

        let Some(panel_el) = card.find_mut(has_class(panel.class())) else {
            return;
        };
        let expanded = if is_collapsed(panel_el) {
            panel_el.replace_children([panel.render(recipe)]);
            panel_el.remove_class(HIDDEN_CLASS);
            true
        } else {
            panel_el.add_class(HIDDEN_CLASS);
            false
        };

        let (show_label, hide_label) = panel.labels();

        if let Some(button) = card.node_at_mut(button_path) {
            button.set_text(if expanded { hide_label } else { show_label });
        }
    }

    /// Re-run the pipeline and replace the rendered cards, counter and
    /// active buttons. Returns how many recipes are shown.
    pub fn refresh(&mut self) -> usize {
        let visible = query::run(&self.catalog, &self.state, self.favorites.ids());
        let shown = visible.len();
        let cards = render_cards(&visible, self.favorites.ids());

        self.page.replace_cards(cards);
        self.page.set_count(&count_text(shown, self.catalog.len()));
        self.page.set_active_filter(self.state.filter.as_str());
        self.page.set_active_sort(self.state.sort.as_str());

        debug!(
            "refresh: filter={} sort={} search={:?} -> {} of {}",
            self.state.filter,
            self.state.sort,
            self.state.search,
            shown,
            self.catalog.len()
        );
        shown
    }

    /// Path from the container to the control with class `control_class`
    /// inside the card for `id`, as it is currently rendered
    pub fn control_path(&self, id: RecipeId, control_class: &str) -> Option<Vec<usize>> {
        let container = self.page.container()?;
        let id = id.to_string();
        let mut path = container
            .find_path(|el| el.has_class(CARD_CLASS) && el.data("id") == Some(id.as_str()))?;
        let card = container.node_at(&path)?;
        path.extend(card.find_path(has_class(control_class))?);
        Some(path)
    }

    /// Ids of the recipes currently shown, in display order
    pub fn visible_ids(&self) -> Vec<RecipeId> {
        query::run(&self.catalog, &self.state, self.favorites.ids())
            .iter()
            .map(|r| r.id)
            .collect()
    }

    pub fn state(&self) -> &Query {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Search text typed but not applied yet
    pub fn pending_search(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.value.as_str())
    }

    pub fn into_store(self) -> S {
        self.favorites.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn browser() -> RecipeBrowser<MemoryStore> {
        RecipeBrowser::builder(MemoryStore::new()).build()
    }

    fn card(browser: &RecipeBrowser<MemoryStore>, id: RecipeId) -> &Element {
        let path = browser.control_path(id, CARD_CLASS).unwrap();
        browser.page().container().unwrap().node_at(&path).unwrap()
    }

    #[test]
    fn test_initial_render() {
        let browser = browser();
        assert_eq!(browser.visible_ids(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            browser.page().count().as_deref(),
            Some("Showing 8 of 8 recipes")
        );
        assert_eq!(browser.page().active_filter(), Some("all"));
        assert_eq!(browser.page().active_sort(), Some("none"));
    }

    #[test]
    fn test_filter_and_sort_clicks() {
        let mut browser = browser();
        assert!(browser
            .handle(Event::FilterClicked("quick".to_string()))
            .is_empty());
        browser.handle(Event::SortClicked("time".to_string()));

        assert_eq!(browser.visible_ids(), vec![4, 6, 1, 7]);
        assert_eq!(browser.page().active_filter(), Some("quick"));
        assert_eq!(browser.page().active_sort(), Some("time"));
        assert_eq!(
            browser.page().count().as_deref(),
            Some("Showing 4 of 8 recipes")
        );
    }

    #[test]
    fn test_search_is_debounced() {
        let mut browser = browser();

        let effects = browser.handle(Event::SearchInput("pizza".to_string()));
        assert_eq!(
            effects,
            vec![Effect::ScheduleSearch {
                generation: 1,
                delay: DEFAULT_DEBOUNCE
            }]
        );
        // Nothing applied yet, but the clear button shows immediately
        assert_eq!(browser.visible_ids().len(), 8);
        assert!(browser.page().clear_visible());
        assert_eq!(browser.pending_search(), Some("pizza"));

        browser.handle(Event::SearchSettled { generation: 1 });
        assert_eq!(browser.visible_ids(), vec![8]);
        assert_eq!(browser.state().search, "pizza");
        assert_eq!(browser.pending_search(), None);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut browser = browser();
        browser.handle(Event::SearchInput("p".to_string()));
        browser.handle(Event::SearchInput("pad".to_string()));

        browser.handle(Event::SearchSettled { generation: 1 });
        assert_eq!(browser.state().search, "");
        assert_eq!(browser.pending_search(), Some("pad"));

        browser.handle(Event::SearchSettled { generation: 2 });
        assert_eq!(browser.visible_ids(), vec![7]);
    }

    #[test]
    fn test_clear_search() {
        let mut browser = browser();
        browser.handle(Event::SearchInput("thai".to_string()));
        browser.handle(Event::SearchSettled { generation: 1 });
        browser.handle(Event::SearchInput("thai noodles".to_string()));

        let effects = browser.handle(Event::ClearSearch);
        assert_eq!(effects, vec![Effect::CancelSearch]);
        assert_eq!(browser.page().search_value(), "");
        assert!(!browser.page().clear_visible());
        assert_eq!(browser.pending_search(), None);
        assert_eq!(browser.visible_ids().len(), 8);

        // A timer that slipped through after the clear changes nothing
        browser.handle(Event::SearchSettled { generation: 2 });
        assert_eq!(browser.visible_ids().len(), 8);
    }

    #[test]
    fn test_submit_search_skips_debounce() {
        let mut browser = browser();
        browser.handle(Event::SearchInput("sal".to_string()));

        let effects = browser.submit_search("croissant");
        assert_eq!(effects, vec![Effect::CancelSearch]);
        assert_eq!(browser.visible_ids(), vec![3]);
        assert_eq!(browser.page().search_value(), "croissant");
        assert!(browser.page().clear_visible());
        assert!(browser.submit_search("").is_empty());
        assert_eq!(browser.visible_ids().len(), 8);
    }

    #[test]
    fn test_click_outside_cards_is_noop() {
        let mut browser = browser();
        let before = browser.page().root().clone();

        browser.handle(Event::CardClick { path: Vec::new() });
        browser.handle(Event::CardClick { path: vec![42, 0] });
        assert_eq!(browser.page().root(), &before);
    }

    #[test]
    fn test_favorite_click() {
        let mut browser = browser();
        let path = browser.control_path(3, FAVORITE_BUTTON_CLASS).unwrap();
        browser.handle(Event::CardClick { path });

        assert!(browser.favorites().is_favorite(3));
        browser.handle(Event::FilterClicked("favorites".to_string()));
        assert_eq!(browser.visible_ids(), vec![3]);
    }

    #[test]
    fn test_favorites_written_to_store() {
        let mut browser = browser();
        browser.toggle_favorite(6);
        browser.toggle_favorite(2);

        let store = browser.into_store();
        assert_eq!(store.get(DEFAULT_FAVORITES_KEY), Some("[2,6]".to_string()));
    }

    /// Store whose writes always fail, like a full or read-only disk
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), crate::BrowserError> {
            Err(crate::BrowserError::Storage(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_failed_favorite_write_still_toggles() {
        use crate::render::{FAVORITE_GLYPH, NOT_FAVORITE_GLYPH};

        let glyph = |browser: &RecipeBrowser<ReadOnlyStore>, id: RecipeId| {
            let path = browser.control_path(id, FAVORITE_BUTTON_CLASS).unwrap();
            browser
                .page()
                .container()
                .unwrap()
                .node_at(&path)
                .unwrap()
                .text_content()
        };

        let mut browser = RecipeBrowser::builder(ReadOnlyStore).build();
        assert_eq!(glyph(&browser, 4), NOT_FAVORITE_GLYPH);

        let path = browser.control_path(4, FAVORITE_BUTTON_CLASS).unwrap();
        browser.handle(Event::CardClick { path });
        assert!(browser.favorites().is_favorite(4));
        assert_eq!(glyph(&browser, 4), FAVORITE_GLYPH);

        browser.handle(Event::FilterClicked("favorites".to_string()));
        assert_eq!(browser.visible_ids(), vec![4]);

        browser.toggle_favorite(4);
        assert!(!browser.favorites().is_favorite(4));
        assert_eq!(
            browser.page().count().as_deref(),
            Some("Showing 0 of 8 recipes")
        );
    }

    #[test]
    fn test_steps_toggle_in_place() {
        let mut browser = browser();
        let path = browser.control_path(1, STEPS_TOGGLE_CLASS).unwrap();

        browser.handle(Event::CardClick { path: path.clone() });
        let panel = card(&browser, 1).find(has_class(STEPS_PANEL_CLASS)).unwrap();
        assert!(!is_collapsed(panel));
        assert!(panel.text_content().contains("Whisk eggs and parmesan."));
        let button = card(&browser, 1).find(has_class(STEPS_TOGGLE_CLASS)).unwrap();
        assert_eq!(button.text_content(), HIDE_STEPS);

        // Other cards are untouched
        let other = card(&browser, 2).find(has_class(STEPS_PANEL_CLASS)).unwrap();
        assert!(is_collapsed(other));

        browser.handle(Event::CardClick { path });
        let panel = card(&browser, 1).find(has_class(STEPS_PANEL_CLASS)).unwrap();
        assert!(is_collapsed(panel));
        let button = card(&browser, 1).find(has_class(STEPS_TOGGLE_CLASS)).unwrap();
        assert_eq!(button.text_content(), SHOW_STEPS);
    }

    #[test]
    fn test_ingredients_toggle() {
        let mut browser = browser();
        let path = browser.control_path(8, INGREDIENTS_TOGGLE_CLASS).unwrap();
        browser.handle(Event::CardClick { path });

        let panel = card(&browser, 8)
            .find(has_class(INGREDIENTS_PANEL_CLASS))
            .unwrap();
        assert_eq!(
            panel.to_html(),
            "<div class=\"ingredients\"><ul><li>Pizza Dough</li><li>Tomato Sauce</li>\
             <li>Mozzarella</li><li>Basil</li></ul></div>"
        );
    }

    #[test]
    fn test_refresh_collapses_panels() {
        let mut browser = browser();
        let path = browser.control_path(5, STEPS_TOGGLE_CLASS).unwrap();
        browser.handle(Event::CardClick { path });

        browser.handle(Event::SortClicked("name".to_string()));
        let panel = card(&browser, 5).find(has_class(STEPS_PANEL_CLASS)).unwrap();
        assert!(is_collapsed(panel));
    }

    #[test]
    fn test_toggle_for_unknown_recipe_is_noop() {
        // A page still showing a card whose recipe is gone from the catalog
        let stale = crate::render::render_card(Catalog::builtin().get(3).unwrap(), false);
        let mut page = Page::new();
        page.replace_cards(vec![stale]);

        let catalog = Catalog::new(Vec::new()).unwrap();
        let mut browser = RecipeBrowser::builder(MemoryStore::new())
            .catalog(catalog)
            .build();
        // Building re-rendered the empty catalog; put the stale card back
        browser.page = page;

        let path = browser.control_path(3, STEPS_TOGGLE_CLASS).unwrap();
        let before = browser.page().root().clone();
        browser.handle(Event::CardClick { path });
        assert_eq!(browser.page().root(), &before);
    }
}
