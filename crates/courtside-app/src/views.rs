//! Read-only renderers over session data. Formatting only, no business
//! logic: everything here is a pure function from session state to text.

use std::fmt::Write as _;

use courtside_agent::{ChatSession, SessionMetrics};
use courtside_common::{format_cost, format_duration, format_secs};

/// The session analytics panel: cumulative counters and durations.
pub fn session_panel(metrics: &SessionMetrics) -> String {
    let mut out = String::from("Session Analytics\n");
    let _ = writeln!(
        out,
        "  Session Duration       {}",
        format_duration(metrics.session_duration)
    );
    let _ = writeln!(out, "  Total Input Tokens     {}", metrics.input_tokens);
    let _ = writeln!(out, "  Total Output Tokens    {}", metrics.output_tokens);
    let _ = writeln!(out, "  Total Tokens           {}", metrics.total_tokens);
    let _ = writeln!(out, "  Total Cost             {}", format_cost(metrics.total_cost));
    let _ = writeln!(
        out,
        "  Total Processing Time  {}",
        format_duration(metrics.processing_time)
    );
    out
}

/// The per-prompt breakdown: one block per completed exchange.
pub fn prompt_panel(session: &ChatSession) -> String {
    let mut out = String::new();
    for (n, (user, assistant)) in session.exchanges().enumerate() {
        let _ = writeln!(
            out,
            "Prompt {} - {}",
            n + 1,
            user.timestamp.format("%H:%M:%S")
        );
        let _ = writeln!(out, "  Input Tokens     {}", user.tokens);
        let _ = writeln!(out, "  Output Tokens    {}", assistant.tokens);
        if let Some(elapsed) = assistant.execution_time {
            let _ = writeln!(out, "  Processing Time  {}", format_secs(elapsed));
        }
        let _ = writeln!(
            out,
            "  Total Cost       {}",
            format_cost(user.cost + assistant.cost)
        );
    }
    if out.is_empty() {
        out.push_str("No prompts yet.\n");
    }
    out
}

/// Raw trace JSON for exchange `n` (1-based), pretty-printed.
pub fn raw_trace(session: &ChatSession, n: usize) -> String {
    let Some((_, assistant)) = n.checked_sub(1).and_then(|i| session.exchanges().nth(i)) else {
        return format!("No exchange #{n}.\n");
    };
    match &assistant.trace {
        Some(trace) if !trace.is_empty() => {
            serde_json::to_string_pretty(&trace.to_json()).unwrap_or_else(|e| e.to_string())
        }
        _ => format!("No trace recorded for exchange #{n}.\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_agent::{TraceLog, TracePhase, Turn};
    use std::time::Duration;

    fn session_with_one_exchange() -> ChatSession {
        let mut session = ChatSession::default();
        session.record_turn(Turn::user("hello world", 2, 0.0005));
        let mut trace = TraceLog::new();
        trace.record(TracePhase::Orchestration, serde_json::json!({"step": 1}));
        session.record_turn(Turn::assistant(
            "hi there friend",
            3,
            0.00075,
            Duration::from_millis(1200),
            trace,
        ));
        session
    }

    #[test]
    fn session_panel_lines() {
        let metrics = SessionMetrics {
            input_tokens: 2,
            output_tokens: 3,
            total_tokens: 5,
            total_cost: 0.00125,
            session_duration: Duration::from_secs(65),
            processing_time: Duration::from_secs(2),
            exchange_count: 1,
        };
        let panel = session_panel(&metrics);
        assert!(panel.contains("Session Duration       0:01:05"));
        assert!(panel.contains("Total Input Tokens     2"));
        assert!(panel.contains("Total Output Tokens    3"));
        assert!(panel.contains("Total Tokens           5"));
        assert!(panel.contains("Total Cost             $0.0013"));
        assert!(panel.contains("Total Processing Time  0:00:02"));
    }

    #[test]
    fn prompt_panel_one_block_per_exchange() {
        let session = session_with_one_exchange();
        let panel = prompt_panel(&session);
        assert!(panel.starts_with("Prompt 1 - "));
        assert!(panel.contains("Input Tokens     2"));
        assert!(panel.contains("Output Tokens    3"));
        assert!(panel.contains("Processing Time  1.20s"));
        assert!(panel.contains("Total Cost       $0.0013"));
    }

    #[test]
    fn prompt_panel_empty_session() {
        let session = ChatSession::default();
        assert_eq!(prompt_panel(&session), "No prompts yet.\n");
    }

    #[test]
    fn raw_trace_lookup() {
        let session = session_with_one_exchange();
        let shown = raw_trace(&session, 1);
        assert!(shown.contains("orchestrationTrace"));
        assert!(shown.contains("\"step\": 1"));

        assert_eq!(raw_trace(&session, 2), "No exchange #2.\n");
        assert_eq!(raw_trace(&session, 0), "No exchange #0.\n");
    }
}
