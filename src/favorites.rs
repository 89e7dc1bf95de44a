use std::collections::BTreeSet;

use log::{debug, warn};

use crate::error::BrowserError;
use crate::model::RecipeId;
use crate::storage::KeyValueStore;

/// Storage key used by default, kept compatible with the browser build
pub const DEFAULT_FAVORITES_KEY: &str = "recipeFavorites";

/// Set of favorite recipe ids, persisted as a JSON array of integers.
///
/// Ids are not checked against the catalog; an id that no longer exists is
/// kept and simply never matches anything.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    key: String,
    ids: BTreeSet<RecipeId>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Hydrate from `store` under the default key
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, DEFAULT_FAVORITES_KEY)
    }

    /// Hydrate from `store` under `key`. Absent or malformed data yields an
    /// empty set.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match store.get(&key) {
            Some(raw) => parse_ids(&raw).unwrap_or_else(|e| {
                warn!("ignoring malformed favorites under {:?}: {}", key, e);
                BTreeSet::new()
            }),
            None => BTreeSet::new(),
        };
        debug!("loaded {} favorites", ids.len());

        Self { store, key, ids }
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<RecipeId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id` and persist the whole set.
    ///
    /// Returns whether `id` is a favorite afterwards. The in-memory set is
    /// updated even when persisting fails.
    pub fn toggle(&mut self, id: RecipeId) -> Result<bool, BrowserError> {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        debug!("recipe {} favorite: {}", id, now_favorite);

        self.save()?;
        Ok(now_favorite)
    }

    fn save(&mut self) -> Result<(), BrowserError> {
        let ids: Vec<RecipeId> = self.ids.iter().copied().collect();
        let encoded = serde_json::to_string(&ids)?;
        self.store.set(&self.key, &encoded)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

fn parse_ids(raw: &str) -> Result<BTreeSet<RecipeId>, serde_json::Error> {
    // The browser build stored `null` before anything was favorited. Any bad
    // entry (a string, a negative or out-of-range id) rejects the whole array.
    let ids: Option<Vec<RecipeId>> = serde_json::from_str(raw)?;
    Ok(ids.unwrap_or_default().into_iter().collect())
}
