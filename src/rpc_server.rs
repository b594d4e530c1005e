//! mangashelf RPC Server — JSON-RPC over stdin/stdout for a UI process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.toggle", "params":{"id":"...","title":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries protocol lines only.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::time::Instant;

use log::{error, info, warn};
use serde_json::{json, Value};

use mangashelf::app::App;
use mangashelf::logging;
use mangashelf::rpc_handler::handle_method;
use mangashelf::services::settings_engine::SettingsEngineTrait;

/// Environment variable pointing at an alternative settings file.
const CONFIG_ENV: &str = "MANGASHELF_CONFIG";

/// Fixed-window limiter: at most `max_per_second` requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() {
    let config_path = std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty());
    let app = match App::new(config_path) {
        Ok(app) => app,
        Err(e) => {
            logging::init("info");
            error!("{}", e);
            std::process::exit(1);
        }
    };
    logging::init(&app.settings_engine.get_settings().logging.level);
    info!("mangashelf-rpc {} ready", env!("CARGO_PKG_VERSION"));
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if respond(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).is_err() {
        return;
    }

    let mut rate_limiter = RateLimiter::new(200);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                if !rate_limiter.check() {
                    json!({"id": id, "error": "rate limit exceeded"})
                } else {
                    let method = req.get("method").and_then(Value::as_str).unwrap_or("");
                    let params = req.get("params").cloned().unwrap_or_else(|| json!({}));
                    match handle_method(&app, method, &params) {
                        Ok(val) => json!({"id": id, "result": val}),
                        Err(err) => json!({"id": id, "error": err}),
                    }
                }
            }
        };

        if respond(&mut out, &response).is_err() {
            break;
        }
    }
    info!("mangashelf-rpc shutting down");
}
