//! Query pipeline: search text, attribute filter and sort applied to a catalog.
//!
//! Every stage takes a borrowed view and returns a new one, so the catalog is
//! never touched. Stages run in a fixed order: search, then filter, then sort.

mod filter;
mod search;
mod sort;

use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::catalog::Catalog;
use crate::model::{Recipe, RecipeId};

pub use filter::{apply_filter, QUICK_MAX_MINUTES};
pub use search::filter_by_search;
pub use sort::{apply_sort, locale_cmp};

/// Attribute filter selected by the filter buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
    /// Recipes taking at most [`QUICK_MAX_MINUTES`]
    Quick,
    Favorites,
}

impl Filter {
    /// Every filter, in the order the buttons are laid out
    pub const ALL: [Filter; 6] = [
        Filter::All,
        Filter::Easy,
        Filter::Medium,
        Filter::Hard,
        Filter::Quick,
        Filter::Favorites,
    ];

    /// Parse a button value. Unknown values fall back to [`Filter::All`].
    pub fn from_value(value: &str) -> Self {
        match value {
            "all" => Filter::All,
            "easy" => Filter::Easy,
            "medium" => Filter::Medium,
            "hard" => Filter::Hard,
            "quick" => Filter::Quick,
            "favorites" => Filter::Favorites,
            other => {
                debug!("unknown filter value {:?}, showing everything", other);
                Filter::All
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Easy => "easy",
            Filter::Medium => "medium",
            Filter::Hard => "hard",
            Filter::Quick => "quick",
            Filter::Favorites => "favorites",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Easy => "Easy",
            Filter::Medium => "Medium",
            Filter::Hard => "Hard",
            Filter::Quick => "Quick (≤30 min)",
            Filter::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering selected by the sort buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sort {
    /// Keep catalog order
    #[default]
    None,
    Name,
    Time,
}

impl Sort {
    pub const ALL: [Sort; 3] = [Sort::None, Sort::Name, Sort::Time];

    /// Parse a button value. Unknown values fall back to [`Sort::None`].
    pub fn from_value(value: &str) -> Self {
        match value {
            "none" => Sort::None,
            "name" => Sort::Name,
            "time" => Sort::Time,
            other => {
                debug!("unknown sort value {:?}, keeping catalog order", other);
                Sort::None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::None => "none",
            Sort::Name => "name",
            Sort::Time => "time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sort::None => "Default",
            Sort::Name => "Name",
            Sort::Time => "Time",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of the UI state that decides which recipes are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filter: Filter,
    pub sort: Sort,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }
}

/// Run the whole pipeline against a catalog.
///
/// Deterministic and side-effect free: the same catalog, query and favorites
/// always produce the same sequence.
pub fn run<'a>(
    catalog: &'a Catalog,
    query: &Query,
    favorites: &BTreeSet<RecipeId>,
) -> Vec<&'a Recipe> {
    let all: Vec<&Recipe> = catalog.iter().collect();
    let searched = filter_by_search(&all, &query.search);
    let filtered = apply_filter(&searched, query.filter, favorites);
    apply_sort(&filtered, query.sort)
}
