//! Keeps noisy best-effort failures (completion pings, mostly) from flooding
//! the logs: one line per key per window, with a count of what was skipped.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    skipped: u64,
}

static WINDOWS: OnceLock<Mutex<HashMap<String, Window>>> = OnceLock::new();

/// `Some(skipped)` when a line for `key` should be written now, where
/// `skipped` is how many were swallowed since the last one. `None` otherwise.
pub fn should_emit(key: &str, interval: Duration) -> Option<u64> {
    let windows = WINDOWS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut windows = windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let now = Instant::now();

    let Some(window) = windows.get_mut(key) else {
        windows.insert(
            key.to_string(),
            Window {
                opened_at: now,
                skipped: 0,
            },
        );
        return Some(0);
    };
    if now.duration_since(window.opened_at) >= interval {
        let skipped = window.skipped;
        window.opened_at = now;
        window.skipped = 0;
        Some(skipped)
    } else {
        window.skipped += 1;
        None
    }
}
