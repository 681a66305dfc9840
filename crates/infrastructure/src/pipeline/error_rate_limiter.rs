use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-error-kind sampling counter for warn-level logging.
///
/// A single misbehaving table probe can otherwise produce one `warn!` per
/// query; this caps each error kind independently at `max_per_sec` lines,
/// so a storm in one kind never drowns out a rarer one. Counters live
/// behind a single `Mutex` rather than per-kind atomics — error paths are
/// by definition not the hot path, so the extra lock is not worth avoiding.
pub struct ErrorLogLimiter {
    max_per_sec: u32,
    windows: Mutex<HashMap<&'static str, (Instant, u32)>>,
}

impl ErrorLogLimiter {
    pub fn new(max_per_sec: u32) -> Self {
        Self {
            max_per_sec,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if this occurrence of `kind` should be logged.
    /// `max_per_sec == 0` disables logging for every kind entirely.
    pub fn allow(&self, kind: &'static str) -> bool {
        if self.max_per_sec == 0 {
            return false;
        }
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap();
        let window = windows.entry(kind).or_insert((now, 0));
        if now.duration_since(window.0) >= Duration::from_secs(1) {
            *window = (now, 1);
            true
        } else if window.1 < self.max_per_sec {
            window.1 += 1;
            true
        } else {
            false
        }
    }
}
