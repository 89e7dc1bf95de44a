//! Event loop tying user input, the controller and the debounce timer
//! together on a single task.

use log::debug;
use tokio::sync::mpsc;

use crate::controller::{Effect, Event, RecipeBrowser};
use crate::debounce::Debouncer;
use crate::model::RecipeId;
use crate::render::{
    CARD_CLASS, FAVORITE_BUTTON_CLASS, INGREDIENTS_TOGGLE_CLASS, STEPS_TOGGLE_CLASS,
};
use crate::storage::KeyValueStore;

/// User input as a front end reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Filter button with this value
    Filter(String),
    /// Sort button with this value
    Sort(String),
    /// New raw content of the search box
    Type(String),
    /// Clear-search button
    Clear,
    /// Favorite button on the card for this recipe
    Favorite(RecipeId),
    /// Steps disclosure button on the card for this recipe
    Steps(RecipeId),
    /// Ingredients disclosure button on the card for this recipe
    Ingredients(RecipeId),
    /// Somewhere on the card for this recipe, outside any control
    Card(RecipeId),
}

/// Owns a [`RecipeBrowser`] and carries out the effects it asks for
#[derive(Debug)]
pub struct Session<S> {
    browser: RecipeBrowser<S>,
    debouncer: Debouncer<Event>,
    timers: mpsc::UnboundedReceiver<Event>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(browser: RecipeBrowser<S>) -> Self {
        let (tx, timers) = mpsc::unbounded_channel();
        Self {
            browser,
            debouncer: Debouncer::new(tx),
            timers,
        }
    }

    pub fn browser(&self) -> &RecipeBrowser<S> {
        &self.browser
    }

    pub fn into_browser(self) -> RecipeBrowser<S> {
        self.browser
    }

    /// Translate input into a controller event. Clicks on cards that are not
    /// currently shown resolve to nothing.
    pub fn resolve(&self, input: Input) -> Option<Event> {
        let click = |id: RecipeId, class: &'static str| {
            let path = self.browser.control_path(id, class);
            if path.is_none() {
                debug!("recipe {} is not on the page", id);
            }
            path.map(|path| Event::CardClick { path })
        };

        match input {
            Input::Filter(value) => Some(Event::FilterClicked(value)),
            Input::Sort(value) => Some(Event::SortClicked(value)),
            Input::Type(value) => Some(Event::SearchInput(value)),
            Input::Clear => Some(Event::ClearSearch),
            Input::Favorite(id) => click(id, FAVORITE_BUTTON_CLASS),
            Input::Steps(id) => click(id, STEPS_TOGGLE_CLASS),
            Input::Ingredients(id) => click(id, INGREDIENTS_TOGGLE_CLASS),
            Input::Card(id) => click(id, CARD_CLASS),
        }
    }

    /// Feed one event to the controller and carry out its effects
    pub fn dispatch(&mut self, event: Event) {
        for effect in self.browser.handle(event) {
            match effect {
                Effect::ScheduleSearch { generation, delay } => self
                    .debouncer
                    .schedule(delay, Event::SearchSettled { generation }),
                Effect::CancelSearch => self.debouncer.cancel(),
            }
        }
    }

    pub fn send(&mut self, input: Input) {
        if let Some(event) = self.resolve(input) {
            self.dispatch(event);
        }
    }

    /// Wait until typed search text has been applied. Returns at once when
    /// nothing is pending.
    pub async fn settle(&mut self) {
        while self.browser.pending_search().is_some() {
            match self.timers.recv().await {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }

    /// Process input until the sender side closes, then let any pending
    /// search land. `on_update` runs after every processed event.
    pub async fn run<F>(mut self, mut input: mpsc::Receiver<Input>, mut on_update: F) -> Self
    where
        F: FnMut(&RecipeBrowser<S>),
    {
        loop {
            tokio::select! {
                received = input.recv() => match received {
                    Some(next) => self.send(next),
                    None => break,
                },
                Some(event) = self.timers.recv() => self.dispatch(event),
            }
            on_update(&self.browser);
        }

        if self.browser.pending_search().is_some() {
            self.settle().await;
            on_update(&self.browser);
        }
        self
    }
}
