//! Unit tests for the RPC handler — every JSON-RPC method dispatched by `handle_method`.
//!
//! Uses the same code path as the `mangashelf-rpc` binary, with a memory-backed
//! app or a file-backed app in a temp directory.

use std::sync::Mutex;

use mangashelf::app::App;
use mangashelf::rpc_handler::handle_method;
use mangashelf::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use mangashelf::types::settings::{ShelfSettings, StorageBackend};
use serde_json::json;
use tempfile::TempDir;

fn setup() -> Mutex<App> {
    Mutex::new(App::in_memory())
}

/// A file-backed app whose settings and data both live in `dir`.
fn file_app(dir: &TempDir) -> Mutex<App> {
    let mut settings = ShelfSettings::default();
    settings.storage.backend = StorageBackend::File;
    settings.storage.data_dir = Some(dir.path().to_string_lossy().to_string());
    let config = dir.path().join("settings.json").to_string_lossy().to_string();
    Mutex::new(App::from_engine(SettingsEngine::with_settings(
        Some(config),
        settings,
    )))
}

// ─── Ping ───

#[test]
fn test_ping() {
    let app = setup();
    let res = handle_method(&app, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let app = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert_eq!(res.unwrap_err(), "unknown method: nonexistent.method");
}

// ─── Bookmarks ───

#[test]
fn test_bookmark_add_and_list() {
    let app = setup();

    let res = handle_method(
        &app,
        "bookmark.add",
        &json!({"id": "m1", "title": "Monster", "coverImage": "https://x/m1.jpg"}),
    )
    .unwrap();
    assert_eq!(res, json!({"added": true, "bookmarked": true}));

    let again = handle_method(&app, "bookmark.add", &json!({"id": "m1", "title": "Other"})).unwrap();
    assert_eq!(again["added"], false);

    let list = handle_method(&app, "bookmark.list", &json!({})).unwrap();
    assert_eq!(list["total"], 1);
    let item = &list["items"][0];
    assert_eq!(item["id"], "m1");
    assert_eq!(item["title"], "Monster");
    assert_eq!(item["coverImage"], "https://x/m1.jpg");
    assert!(item["addedAt"].is_string());
}

#[test]
fn test_bookmark_add_requires_id_and_title() {
    let app = setup();
    assert_eq!(
        handle_method(&app, "bookmark.add", &json!({"title": "x"})).unwrap_err(),
        "missing id"
    );
    assert_eq!(
        handle_method(&app, "bookmark.add", &json!({"id": "x"})).unwrap_err(),
        "missing title"
    );
    assert!(handle_method(&app, "bookmark.add", &json!({"id": "", "title": "x"})).is_err());
}

#[test]
fn test_bookmark_toggle_roundtrip() {
    let app = setup();

    let on = handle_method(&app, "bookmark.toggle", &json!({"id": "1", "title": "Foo"})).unwrap();
    assert_eq!(on, json!({"bookmarked": true}));

    // Removing needs only the id.
    let off = handle_method(&app, "bookmark.toggle", &json!({"id": "1"})).unwrap();
    assert_eq!(off, json!({"bookmarked": false}));

    // Adding without a title is refused and changes nothing.
    let refused = handle_method(&app, "bookmark.toggle", &json!({"id": "1"}));
    assert_eq!(refused.unwrap_err(), "missing title");
    let status = handle_method(&app, "bookmark.isBookmarked", &json!({"id": "1"})).unwrap();
    assert_eq!(status, json!({"bookmarked": false}));
}

#[test]
fn test_bookmark_remove_get_and_is_bookmarked() {
    let app = setup();
    handle_method(&app, "bookmark.add", &json!({"id": "a", "title": "Akira"})).unwrap();

    let got = handle_method(&app, "bookmark.get", &json!({"id": "a"})).unwrap();
    assert_eq!(got["title"], "Akira");

    let removed = handle_method(&app, "bookmark.remove", &json!({"id": "a"})).unwrap();
    assert_eq!(removed, json!({"removed": true, "bookmarked": false}));
    let removed = handle_method(&app, "bookmark.remove", &json!({"id": "a"})).unwrap();
    assert_eq!(removed["removed"], false);

    let got = handle_method(&app, "bookmark.get", &json!({"id": "a"})).unwrap();
    assert!(got.is_null());
    assert_eq!(
        handle_method(&app, "bookmark.isBookmarked", &json!({"id": "a"})).unwrap()["bookmarked"],
        false
    );
}

#[test]
fn test_bookmark_search_and_clear() {
    let app = setup();
    handle_method(&app, "bookmark.add", &json!({"id": "1", "title": "Berserk"})).unwrap();
    handle_method(
        &app,
        "bookmark.add",
        &json!({"id": "2", "title": "Frieren", "originalTitle": "Sousou no Frieren"}),
    )
    .unwrap();

    let found = handle_method(&app, "bookmark.search", &json!({"query": "sousou"})).unwrap();
    assert_eq!(found["total"], 1);
    assert_eq!(found["items"][0]["id"], "2");

    assert_eq!(
        handle_method(&app, "bookmark.search", &json!({})).unwrap_err(),
        "missing query"
    );

    let cleared = handle_method(&app, "bookmark.clear", &json!({})).unwrap();
    assert_eq!(cleared, json!({"ok": true}));
    let status = handle_method(&app, "bookmark.status", &json!({})).unwrap();
    assert_eq!(status, json!({"total": 0, "persistError": null}));
}

#[test]
fn test_file_backed_bookmarks_survive_app_restart() {
    let dir = TempDir::new().unwrap();
    {
        let app = file_app(&dir);
        handle_method(&app, "bookmark.add", &json!({"id": "a", "title": "A"})).unwrap();
        handle_method(&app, "bookmark.add", &json!({"id": "b", "title": "B"})).unwrap();
    }

    let app = file_app(&dir);
    let list = handle_method(&app, "bookmark.list", &json!({})).unwrap();
    let ids: Vec<&str> = list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(dir.path().join("mangaBookmarks.json").exists());
}

// ─── Settings ───

#[test]
fn test_settings_get_and_set() {
    let dir = TempDir::new().unwrap();
    let app = file_app(&dir);

    let settings = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(settings["storage"]["backend"], "file");
    assert_eq!(settings["storage"]["slot_key"], "mangaBookmarks");

    let ok = handle_method(
        &app,
        "settings.set",
        &json!({"key": "logging.level", "value": "debug"}),
    )
    .unwrap();
    assert_eq!(ok, json!({"ok": true}));
    assert_eq!(
        app.lock().unwrap().settings_engine.get_settings().logging.level,
        "debug"
    );

    assert_eq!(
        handle_method(&app, "settings.set", &json!({"key": "logging.level"})).unwrap_err(),
        "missing value"
    );
    assert!(handle_method(&app, "settings.set", &json!({"key": "nope", "value": 1})).is_err());
}

#[test]
fn test_calls_still_work_after_a_panic_while_holding_the_app() {
    let app = setup();
    handle_method(&app, "bookmark.add", &json!({"id": "a", "title": "Akira"})).unwrap();

    let crashed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = app.lock().unwrap();
        panic!("handler crashed while holding the app");
    }));
    assert!(crashed.is_err());
    assert!(app.is_poisoned());

    let res = handle_method(&app, "bookmark.isBookmarked", &json!({"id": "a"})).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));
    let res = handle_method(&app, "bookmark.add", &json!({"id": "b", "title": "Blame!"})).unwrap();
    assert_eq!(res["added"], true);
}
