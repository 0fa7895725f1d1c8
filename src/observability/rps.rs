//! Requests-per-second accounting.
//!
//! A single window (start second + count) guarded by a mutex. The request
//! that finds the window at least a minute old reports `count / elapsed`,
//! restarts the window at the current second and is not counted itself.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a reporting window in seconds.
pub const WINDOW_SECS: u64 = 60;

#[derive(Debug)]
struct Window {
    started_at: u64,
    count: u64,
}

/// Rate reported when a window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    pub requests_per_second: u64,
    pub elapsed_secs: u64,
}

/// Process-wide request counter.
#[derive(Debug)]
pub struct RequestCounter {
    window: Mutex<Window>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::starting_at(unix_secs())
    }

    pub fn starting_at(now_secs: u64) -> Self {
        Self {
            window: Mutex::new(Window {
                started_at: now_secs,
                count: 0,
            }),
        }
    }

    /// Account one request at the current time.
    pub fn record(&self) -> Option<Rate> {
        self.record_at(unix_secs())
    }

    /// Account one request at `now_secs`.
    pub fn record_at(&self, now_secs: u64) -> Option<Rate> {
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        let elapsed = now_secs.saturating_sub(window.started_at);
        if elapsed >= WINDOW_SECS {
            let rate = Rate {
                requests_per_second: window.count / elapsed,
                elapsed_secs: elapsed,
            };
            window.started_at = now_secs;
            window.count = 0;
            Some(rate)
        } else {
            window.count += 1;
            None
        }
    }

    /// Requests counted in the current window.
    pub fn count(&self) -> u64 {
        self.window.lock().unwrap_or_else(|e| e.into_inner()).count
    }
}

impl Default for RequestCounter {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
