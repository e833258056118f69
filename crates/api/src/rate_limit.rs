use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Sliding-window request counter keyed by client address.
#[derive(Debug, Clone)]
pub struct ClientRateLimiter {
    inner: Arc<Mutex<Buckets>>,
    window: Duration,
    max_requests: usize,
}

#[derive(Debug, Default)]
struct Buckets {
    clients: HashMap<String, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
}

impl ClientRateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Buckets::default())),
            window,
            max_requests,
        }
    }

    /// `Err` carries how long until the oldest request leaves the window.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut guard = self.inner.lock();
        self.sweep_idle(&mut guard, now);

        let queue = guard.clients.entry(key.to_string()).or_default();
        prune(queue, now, self.window);

        if queue.len() >= self.max_requests {
            let retry_after = queue
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            if queue.is_empty() {
                guard.clients.remove(key);
            }
            return Err(retry_after);
        }

        queue.push_back(now);
        Ok(())
    }

    /// At most once per window, forgets clients with no request inside it.
    fn sweep_idle(&self, buckets: &mut Buckets, now: Instant) {
        let due = buckets
            .last_sweep
            .map_or(true, |last| now.saturating_duration_since(last) >= self.window);
        if !due {
            return;
        }

        let window = self.window;
        buckets.clients.retain(|_, queue| {
            prune(queue, now, window);
            !queue.is_empty()
        });
        buckets.last_sweep = Some(now);
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.inner.lock().clients.len()
    }
}

fn prune(queue: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(front) = queue.front() {
        if now.saturating_duration_since(*front) >= window {
            queue.pop_front();
        } else {
            break;
        }
    }
}
