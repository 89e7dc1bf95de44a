//! Recipe browser: a fixed recipe catalog with search, filters, sorting,
//! favorites and expandable step/ingredient details.
//!
//! The query pipeline ([`query`]) is pure. The [`controller`] owns all
//! mutable state and updates a structured [`page`], while the [`runtime`]
//! drives it from user input and runs the search debounce timer.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod favorites;
pub mod model;
pub mod page;
pub mod query;
pub mod render;
pub mod runtime;
pub mod storage;

pub use catalog::Catalog;
pub use config::BrowserConfig;
pub use controller::{Effect, Event, RecipeBrowser, RecipeBrowserBuilder};
pub use error::BrowserError;
pub use favorites::FavoritesStore;
pub use model::{Difficulty, Recipe, RecipeId, Step};
pub use page::Page;
pub use query::{Filter, Query, Sort};
pub use runtime::{Input, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
