use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_DELAY_MS: u64 = 1_000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 2_000;

/// Inclusive window for the cosmetic pause before an assistant reply is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PacingBounds")]
pub struct ReplyPacing {
    min_ms: u64,
    max_ms: u64,
}

#[derive(Deserialize)]
struct PacingBounds {
    min_ms: u64,
    max_ms: u64,
}

impl From<PacingBounds> for ReplyPacing {
    fn from(bounds: PacingBounds) -> Self {
        Self::new(bounds.min_ms, bounds.max_ms)
    }
}

impl Default for ReplyPacing {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl ReplyPacing {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn immediate() -> Self {
        Self::new(0, 0)
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Maps an arbitrary random sample onto the window.
    pub fn delay_from(&self, sample: u64) -> Duration {
        let span = self.max_ms.saturating_sub(self.min_ms);
        let offset = match span.checked_add(1) {
            Some(width) => sample % width,
            None => sample,
        };
        Duration::from_millis(self.min_ms + offset)
    }
}
