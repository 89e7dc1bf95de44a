use std::collections::BTreeSet;
use std::fs;

use recipe_browser::favorites::DEFAULT_FAVORITES_KEY;
use recipe_browser::{Event, FavoritesStore, FileStore, KeyValueStore, RecipeBrowser};

#[test]
fn test_toggle_then_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut favorites = FavoritesStore::load(FileStore::new(&path));
    favorites.toggle(3).unwrap();
    drop(favorites);

    let reloaded = FavoritesStore::load(FileStore::new(&path));
    assert_eq!(reloaded.ids(), &BTreeSet::from([3]));

    // Stored as a plain JSON array of ids
    let raw = FileStore::new(&path).get(DEFAULT_FAVORITES_KEY).unwrap();
    assert_eq!(raw, "[3]");
}

#[test]
fn test_corrupt_storage_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "\u{0}\u{1}garbage").unwrap();

    let mut favorites = FavoritesStore::load(FileStore::new(&path));
    assert!(favorites.is_empty());

    // The next write replaces the garbage with valid data
    favorites.toggle(6).unwrap();
    let reloaded = FavoritesStore::load(FileStore::new(&path));
    assert!(reloaded.is_favorite(6));
}

#[test]
fn test_corrupt_favorites_entry_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(
        &path,
        r#"{"recipeFavorites": "[1, 2", "somethingElse": "kept"}"#,
    )
    .unwrap();

    let mut favorites = FavoritesStore::load(FileStore::new(&path));
    assert!(favorites.is_empty());
    favorites.toggle(1).unwrap();

    // Other keys survive a favorites write
    let store = FileStore::new(&path);
    assert_eq!(store.get("somethingElse"), Some("kept".to_string()));
    assert_eq!(store.get(DEFAULT_FAVORITES_KEY), Some("[1]".to_string()));
}

#[test]
fn test_stale_ids_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut store = FileStore::new(&path);
    store.set(DEFAULT_FAVORITES_KEY, "[2, 404]").unwrap();

    let mut browser = RecipeBrowser::builder(FileStore::new(&path)).build();
    assert!(browser.favorites().is_favorite(404));

    browser.handle(Event::FilterClicked("favorites".to_string()));
    assert_eq!(browser.visible_ids(), vec![2]);
    assert_eq!(
        browser.page().count().as_deref(),
        Some("Showing 1 of 8 recipes")
    );
}

#[test]
fn test_browser_favorites_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut browser = RecipeBrowser::builder(FileStore::new(&path))
        .favorites_key("myFavorites")
        .build();
    browser.toggle_favorite(5);
    browser.toggle_favorite(1);
    browser.toggle_favorite(5);
    drop(browser);

    let mut browser = RecipeBrowser::builder(FileStore::new(&path))
        .favorites_key("myFavorites")
        .build();
    assert_eq!(browser.favorites().ids(), &BTreeSet::from([1]));

    browser.handle(Event::FilterClicked("favorites".to_string()));
    assert_eq!(browser.visible_ids(), vec![1]);
}
