//! Generation counters for discarding stale asynchronous results
//!
//! Every asynchronous operation (analysis request, diagram render) is tagged
//! with the generation that was current when it was issued. Completions are
//! applied only while their generation is still the latest one, which gives
//! last-issued-wins semantics regardless of completion order.

use std::fmt;

/// Tag attached to one issued asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`Generation`] tags for a single operation kind
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Generation,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation; all earlier ones become stale
    pub fn advance(&mut self) -> Generation {
        self.latest = Generation(self.latest.0 + 1);
        self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }
}
