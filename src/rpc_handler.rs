//! RPC method handler for the mangashelf JSON-RPC bridge.
//!
//! Kept apart from `rpc_server.rs` so every method can be unit-tested without
//! stdin/stdout. `handle_method` dispatches a method name and its params to the
//! bookmark store or the settings engine.

use std::sync::{Mutex, MutexGuard};

use log::warn;
use serde_json::{json, Value};

use crate::app::App;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::bookmark::{BookmarkRecord, NewBookmark};

/// Locks the app, recovering it if an earlier call panicked while holding the lock.
fn lock_app(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(|poisoned| {
        warn!("app lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", name))
}

fn opt_str_param(params: &Value, name: &str) -> Option<String> {
    params.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Reads `id`, `title`, `originalTitle` and `coverImage`. `title` is required
/// only when `require_title` is set.
fn manga_param(params: &Value, require_title: bool) -> Result<NewBookmark, String> {
    let id = str_param(params, "id")?;
    if id.is_empty() {
        return Err("invalid id: must not be empty".to_string());
    }
    let title = match opt_str_param(params, "title") {
        Some(title) => title,
        None if require_title => return Err("missing title".to_string()),
        None => String::new(),
    };
    Ok(NewBookmark {
        id: id.to_string(),
        title,
        original_title: opt_str_param(params, "originalTitle"),
        cover_image: opt_str_param(params, "coverImage"),
    })
}

fn items(records: Vec<BookmarkRecord>) -> Result<Value, String> {
    let total = records.len();
    let items = serde_json::to_value(records).map_err(|e| e.to_string())?;
    Ok(json!({"items": items, "total": total}))
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => {
            let manga = manga_param(params, true)?;
            let a = lock_app(app);
            let added = a.bookmarks.add(manga);
            Ok(json!({"added": added, "bookmarked": true}))
        }
        "bookmark.remove" => {
            let id = str_param(params, "id")?;
            let a = lock_app(app);
            let removed = a.bookmarks.remove(id);
            Ok(json!({"removed": removed, "bookmarked": false}))
        }
        "bookmark.toggle" => {
            let manga = manga_param(params, false)?;
            let a = lock_app(app);
            // Holding the app lock keeps the check and the toggle together.
            if opt_str_param(params, "title").is_none() && !a.bookmarks.is_bookmarked(&manga.id) {
                return Err("missing title".to_string());
            }
            let bookmarked = a.bookmarks.toggle(manga);
            Ok(json!({"bookmarked": bookmarked}))
        }
        "bookmark.isBookmarked" => {
            let id = str_param(params, "id")?;
            let a = lock_app(app);
            Ok(json!({"bookmarked": a.bookmarks.is_bookmarked(id)}))
        }
        "bookmark.get" => {
            let id = str_param(params, "id")?;
            let a = lock_app(app);
            serde_json::to_value(a.bookmarks.get(id)).map_err(|e| e.to_string())
        }
        "bookmark.list" => {
            let a = lock_app(app);
            items(a.bookmarks.list())
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            let a = lock_app(app);
            items(a.bookmarks.search(query))
        }
        "bookmark.clear" => {
            let a = lock_app(app);
            a.bookmarks.clear_all();
            Ok(json!({"ok": true}))
        }
        "bookmark.status" => {
            let a = lock_app(app);
            let persist_error = a.bookmarks.last_persist_error().map(|e| e.to_string());
            Ok(json!({"total": a.bookmarks.len(), "persistError": persist_error}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = lock_app(app);
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = lock_app(app);
            a.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
