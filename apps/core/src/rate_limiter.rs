use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Per-session rate limiter using a sliding window.
///
/// Tracks request timestamps for each session id to decide whether a new chat or voice-chat
/// request may proceed.
#[derive(Debug)]
pub struct RateLimiter {
    /// Request timestamps per session, oldest first.
    requests: HashMap<String, VecDeque<Instant>>,
    /// The maximum number of requests allowed within the `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    /// Records a request for `id` and returns `true` if it fits in the window.
    pub fn check(&mut self, id: &str) -> bool {
        self.check_at(id, Instant::now())
    }

    fn check_at(&mut self, id: &str, now: Instant) -> bool {
        let window = self.window;
        let timestamps = self.requests.entry(id.to_string()).or_default();

        while timestamps
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() < self.limit {
            timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Drops sessions with no request inside the window.
    pub fn prune(&mut self) {
        let now = Instant::now();
        let window = self.window;
        self.requests.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|t| now.saturating_duration_since(*t) < window)
        });
    }

    pub fn tracked_sessions(&self) -> usize {
        self.requests.len()
    }
}
