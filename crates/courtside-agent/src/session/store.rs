//! Session state: transcript ownership, counters, reset.

use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use courtside_common::SessionId;

use crate::trace::TraceLog;
use crate::usage::UsageTracker;
use crate::Citation;

use super::turn::Turn;

/// Per-token dollar rates for the two sides of an exchange.
///
/// The original pricing uses one blended figure for both sides, so the
/// default is symmetric; the sides stay independently settable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_rate: f64,
    pub output_rate: f64,
}

impl Pricing {
    pub const DEFAULT_RATE: f64 = 0.000_25;
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_rate: Self::DEFAULT_RATE,
            output_rate: Self::DEFAULT_RATE,
        }
    }
}

/// Point-in-time read of a session's cumulative counters.
#[derive(Debug, Clone, Copy)]
pub struct SessionMetrics {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    /// Elapsed wall time since the session started (or was last reset).
    pub session_duration: Duration,
    /// Summed wall time spent inside runtime calls.
    pub processing_time: Duration,
    pub exchange_count: u64,
}

/// One conversation: identifier, transcript, counters, and the most
/// recent citations/trace kept for display.
pub struct ChatSession {
    pub(super) id: SessionId,
    pub(super) transcript: Vec<Turn>,
    pub(super) usage: UsageTracker,
    pub(super) pricing: Pricing,
    pub(super) started_at: Instant,
    pub(super) last_citations: Vec<Citation>,
    pub(super) last_trace: TraceLog,
    /// Set while a turn is in flight; one turn at a time per session.
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    pub fn new(pricing: Pricing) -> Self {
        Self {
            id: SessionId::new(),
            transcript: Vec::new(),
            usage: UsageTracker::new(),
            pricing,
            started_at: Instant::now(),
            last_citations: Vec::new(),
            last_trace: TraceLog::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Discard all state and start over under a fresh identifier.
    pub fn reset(&mut self) {
        *self = Self::new(self.pricing);
    }

    /// Append a turn and fold it into the cumulative counters.
    ///
    /// `send` records both halves of an exchange through here; callers
    /// recording turns directly are responsible for keeping the
    /// user-then-assistant pairing.
    pub fn record_turn(&mut self, turn: Turn) {
        self.usage.record(&turn);
        self.transcript.push(turn);
    }

    /// Current cumulative counters. Pure read.
    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics {
            input_tokens: self.usage.input_tokens(),
            output_tokens: self.usage.output_tokens(),
            total_tokens: self.usage.total_tokens(),
            total_cost: self.usage.cost(),
            session_duration: self.started_at.elapsed(),
            processing_time: self.usage.processing_time(),
            exchange_count: self.usage.exchange_count(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// The full transcript in append order.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    /// Completed user/assistant pairs, in completion order.
    pub fn exchanges(&self) -> impl Iterator<Item = (&Turn, &Turn)> {
        self.transcript.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Citations from the most recent successful exchange.
    pub fn last_citations(&self) -> &[Citation] {
        &self.last_citations
    }

    /// Trace from the most recent successful exchange.
    pub fn last_trace(&self) -> &TraceLog {
        &self.last_trace
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Pricing::default())
    }
}
