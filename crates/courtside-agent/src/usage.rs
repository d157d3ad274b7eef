//! Cumulative token/cost/time accounting for one session.

use std::time::Duration;

use crate::session::{Role, Turn};

/// Whitespace word count as a stand-in token estimate.
///
/// Deliberately crude and kept that way: cost figures derived from it
/// must stay comparable across sessions, so this must not be swapped for
/// a real tokenizer silently.
pub fn estimate_tokens(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Running totals over every turn recorded in a session. The counters
/// always equal the sums of the corresponding per-turn values.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    input_tokens: u64,
    output_tokens: u64,
    cost: f64,
    processing_time: Duration,
    exchange_count: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one turn into the cumulative counters.
    pub fn record(&mut self, turn: &Turn) {
        match turn.role {
            Role::User => self.input_tokens += turn.tokens,
            Role::Assistant => {
                self.output_tokens += turn.tokens;
                self.exchange_count += 1;
                if let Some(elapsed) = turn.execution_time {
                    self.processing_time += elapsed;
                }
            }
        }
        self.cost += turn.cost;
    }

    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    /// Input + output tokens.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Summed wall time of the runtime calls behind every assistant turn.
    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }

    /// Number of completed user/assistant pairs.
    pub fn exchange_count(&self) -> u64 {
        self.exchange_count
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
