//! Transcript entries and their per-turn metrics.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::trace::TraceLog;

/// Which side of the conversation a transcript entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript, with the metrics charged for it.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    /// Estimated token count of the charged text (whitespace word count).
    pub tokens: u64,
    /// Dollar cost: `tokens` times the session's per-token rate.
    pub cost: f64,
    /// Wall-clock creation time, for the per-prompt analytics view.
    pub timestamp: DateTime<Local>,
    /// Wall time of the runtime call. Assistant turns only.
    pub execution_time: Option<Duration>,
    /// Trace of the call that produced this turn. Assistant turns only.
    pub trace: Option<TraceLog>,
}

impl Turn {
    pub fn user(content: impl Into<String>, tokens: u64, cost: f64) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tokens,
            cost,
            timestamp: Local::now(),
            execution_time: None,
            trace: None,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        tokens: u64,
        cost: f64,
        execution_time: Duration,
        trace: TraceLog,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tokens,
            cost,
            timestamp: Local::now(),
            execution_time: Some(execution_time),
            trace: Some(trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_has_no_call_metadata() {
        let turn = Turn::user("hello", 1, 0.00025);
        assert_eq!(turn.role, Role::User);
        assert!(turn.execution_time.is_none());
        assert!(turn.trace.is_none());
    }

    #[test]
    fn assistant_turn_carries_call_metadata() {
        let turn = Turn::assistant("hi", 1, 0.00025, Duration::from_secs(2), TraceLog::new());
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.execution_time, Some(Duration::from_secs(2)));
        assert!(turn.trace.is_some());
    }
}
