use std::{
    collections::VecDeque,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;

/// Attempt timestamps for one client inside the current window.
#[derive(Debug)]
struct AttemptWindow {
    attempts: VecDeque<Instant>,
    last_seen: Instant,
}

impl AttemptWindow {
    fn new(now: Instant) -> Self {
        Self {
            attempts: VecDeque::new(),
            last_seen: now,
        }
    }

    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.attempts.front() {
            if now.duration_since(*oldest) >= window {
                self.attempts.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Per-client sliding window over login attempts.
#[derive(Clone)]
pub struct LoginLimiter {
    map: Arc<DashMap<String, Arc<Mutex<AttemptWindow>>>>,
    max_attempts: u64,
    window: Duration,
}

impl LoginLimiter {
    pub fn new(max_attempts: u64, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            max_attempts,
            window,
        }
    }

    fn get_window(&self, key: &str, now: Instant) -> Arc<Mutex<AttemptWindow>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(AttemptWindow::new(now))))
            .clone()
    }

    /// Records an attempt for `key`. Returns `Err(retry_after_secs)` once the
    /// window already holds `max_attempts` attempts.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        let entry = self.get_window(key, now);
        let mut window = entry.lock();
        window.last_seen = now;
        window.prune(now, self.window);

        if (window.attempts.len() as u64) < self.max_attempts {
            window.attempts.push_back(now);
            return Ok(());
        }

        let retry_after = window
            .attempts
            .front()
            .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
            .unwrap_or(self.window);

        Err(retry_after.as_secs().max(1))
    }

    /// Forgets a client's attempts, e.g. after a successful login.
    pub fn reset(&self, key: &str) {
        self.map.remove(key);
    }

    /// Drops clients not seen for a full window. Returns how many were removed.
    pub fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let stale: Vec<String> = self
            .map
            .iter()
            .filter_map(|entry| {
                let window = entry.value().lock();
                (now.duration_since(window.last_seen) > self.window).then(|| entry.key().clone())
            })
            .collect();

        for key in &stale {
            self.map.remove(key);
        }
        stale.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
