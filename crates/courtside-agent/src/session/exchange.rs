//! The turn processor: charge the prompt, invoke the runtime, charge the
//! reply, record both halves atomically.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::usage::estimate_tokens;
use crate::{AgentClient, AgentError, AgentReply, Citation};

use super::store::ChatSession;
use super::turn::Turn;

/// Clears the session's busy flag on drop, so it is released even if the
/// send future is cancelled mid-call.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to mark the session busy. Fails if a turn is in flight.
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AgentError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AgentError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ChatSession {
    /// Run one exchange end to end and return the assistant turn.
    ///
    /// Empty or whitespace-only input is a no-op (`Ok(None)`). A failed
    /// runtime call records nothing: the transcript and every counter are
    /// exactly as they were. Token counts are estimated by whitespace
    /// word count; the reply is charged on its original text, before any
    /// sources section is appended.
    pub async fn send(
        &mut self,
        client: &dyn AgentClient,
        input: &str,
    ) -> Result<Option<&Turn>, AgentError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let guard = BusyGuard::acquire(&self.busy)?;

        let input_tokens = estimate_tokens(input);
        let input_cost = input_tokens as f64 * self.pricing.input_rate;

        debug!(session = %self.id, tokens = input_tokens, "invoking agent runtime");
        let result = client.invoke(self.id.as_str(), input).await;
        drop(guard);

        let AgentReply {
            text,
            citations,
            trace,
            elapsed,
        } = result?;

        // Charged on the reply text alone; the sources section rides free.
        let output_tokens = estimate_tokens(&text);
        let output_cost = output_tokens as f64 * self.pricing.output_rate;

        let mut content = text;
        if !citations.is_empty() {
            content.push_str(&sources_section(&citations));
        }

        self.record_turn(Turn::user(input, input_tokens, input_cost));
        self.record_turn(Turn::assistant(
            content,
            output_tokens,
            output_cost,
            elapsed,
            trace.clone(),
        ));
        self.last_citations = citations;
        self.last_trace = trace;

        Ok(self.transcript.last())
    }
}

/// Deterministic sources block: one line per reference, numbered by the
/// 1-based index of its parent citation (so one citation with several
/// references repeats its number).
fn sources_section(citations: &[Citation]) -> String {
    let mut out = String::from("\n\n**Sources:**");
    for (idx, citation) in citations.iter().enumerate() {
        for reference in &citation.references {
            out.push_str(&format!("\n{}. {}", idx + 1, reference.uri));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Pricing, Role};
    use crate::trace::{TraceLog, TracePhase};
    use crate::Reference;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Deterministic stand-in for the runtime.
    struct FakeAgent {
        text: String,
        citations: Vec<Citation>,
        elapsed: Duration,
        fail: bool,
    }

    impl FakeAgent {
        fn replying(text: &str) -> Self {
            Self {
                text: text.to_string(),
                citations: Vec::new(),
                elapsed: Duration::from_millis(1200),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                text: String::new(),
                citations: Vec::new(),
                elapsed: Duration::ZERO,
                fail: true,
            }
        }

        fn with_citations(mut self, citations: Vec<Citation>) -> Self {
            self.citations = citations;
            self
        }
    }

    #[async_trait]
    impl AgentClient for FakeAgent {
        async fn invoke(&self, _session_id: &str, _input: &str) -> Result<AgentReply, AgentError> {
            if self.fail {
                return Err(AgentError::Api("runtime unavailable".into()));
            }
            let mut trace = TraceLog::new();
            trace.record(TracePhase::Orchestration, serde_json::json!({"ok": true}));
            Ok(AgentReply {
                text: self.text.clone(),
                citations: self.citations.clone(),
                trace,
                elapsed: self.elapsed,
            })
        }
    }

    fn citation(uris: &[&str]) -> Citation {
        Citation {
            references: uris
                .iter()
                .map(|uri| Reference {
                    uri: uri.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn exchange_charges_both_sides() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("hi there friend");

        let turn = session.send(&agent, "hello world").await.unwrap().unwrap();
        assert_eq!(turn.content, "hi there friend");
        assert_eq!(turn.tokens, 3);
        assert!((turn.cost - 0.00075).abs() < 1e-12);

        let metrics = session.metrics();
        assert_eq!(metrics.input_tokens, 2);
        assert_eq!(metrics.output_tokens, 3);
        assert_eq!(metrics.total_tokens, 5);
        assert!((metrics.total_cost - 0.00125).abs() < 1e-12);
        assert!(metrics.processing_time >= Duration::from_millis(1200));
        assert_eq!(metrics.exchange_count, 1);
    }

    #[tokio::test]
    async fn transcript_alternates_user_then_assistant() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("reply text here");

        for prompt in ["one", "two again", "three more words"] {
            session.send(&agent, prompt).await.unwrap();
        }

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 6);
        for (i, turn) in transcript.iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role, expected, "turn {i} out of order");
        }
    }

    #[tokio::test]
    async fn counters_equal_per_turn_sums() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("a few reply words");

        session.send(&agent, "first question").await.unwrap();
        session.send(&agent, "and a second longer question").await.unwrap();

        let (mut input, mut output, mut cost) = (0u64, 0u64, 0f64);
        for turn in session.transcript() {
            match turn.role {
                Role::User => input += turn.tokens,
                Role::Assistant => output += turn.tokens,
            }
            cost += turn.cost;
        }
        let metrics = session.metrics();
        assert_eq!(metrics.input_tokens, input);
        assert_eq!(metrics.output_tokens, output);
        assert!((metrics.total_cost - cost).abs() < 1e-12);
    }

    #[tokio::test]
    async fn sources_section_numbering() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("see the sources").with_citations(vec![
            citation(&["s3://a"]),
            citation(&["s3://b", "s3://c"]),
        ]);

        let turn = session.send(&agent, "where from").await.unwrap().unwrap();
        assert_eq!(
            turn.content,
            "see the sources\n\n**Sources:**\n1. s3://a\n2. s3://b\n2. s3://c"
        );
        // Sources text is not charged.
        assert_eq!(turn.tokens, 3);
        assert_eq!(session.last_citations().len(), 2);
    }

    #[tokio::test]
    async fn failed_call_changes_nothing() {
        let mut session = ChatSession::default();
        let good = FakeAgent::replying("fine");
        session.send(&good, "hello there").await.unwrap();
        let before = session.metrics();
        let len_before = session.turn_count();

        let bad = FakeAgent::failing();
        let err = session.send(&bad, "does this work").await.unwrap_err();
        assert!(matches!(err, AgentError::Api(_)));

        let after = session.metrics();
        assert_eq!(session.turn_count(), len_before);
        assert_eq!(after.input_tokens, before.input_tokens);
        assert_eq!(after.output_tokens, before.output_tokens);
        assert_eq!(after.total_cost, before.total_cost);
        assert_eq!(after.processing_time, before.processing_time);
        assert_eq!(after.exchange_count, before.exchange_count);
    }

    #[tokio::test]
    async fn empty_input_is_a_no_op() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("never sent");

        assert!(session.send(&agent, "").await.unwrap().is_none());
        assert!(session.send(&agent, "   \t ").await.unwrap().is_none());
        assert_eq!(session.turn_count(), 0);
    }

    #[tokio::test]
    async fn custom_rates_apply_per_side() {
        let pricing = Pricing {
            input_rate: 0.001,
            output_rate: 0.002,
        };
        let mut session = ChatSession::new(pricing);
        let agent = FakeAgent::replying("two words");

        session.send(&agent, "three word prompt").await.unwrap();
        let metrics = session.metrics();
        // 3 * 0.001 + 2 * 0.002
        assert!((metrics.total_cost - 0.007).abs() < 1e-12);
    }

    #[tokio::test]
    async fn trace_is_stashed_on_session_and_turn() {
        let mut session = ChatSession::default();
        let agent = FakeAgent::replying("traced reply");

        let turn = session.send(&agent, "hello").await.unwrap().unwrap();
        let trace = turn.trace.as_ref().unwrap();
        assert_eq!(trace.records(TracePhase::Orchestration).len(), 1);
        assert!(!session.last_trace().is_empty());
    }

    #[test]
    fn busy_guard_rejects_second_acquire() {
        let flag = AtomicBool::new(false);
        let guard = BusyGuard::acquire(&flag).unwrap();
        assert!(matches!(
            BusyGuard::acquire(&flag),
            Err(AgentError::Busy)
        ));
        drop(guard);
        assert!(BusyGuard::acquire(&flag).is_ok());
    }

    #[test]
    fn sources_section_empty_references() {
        // A citation with no references contributes no lines but keeps
        // its index for the citations after it.
        let section = sources_section(&[citation(&[]), citation(&["s3://x"])]);
        assert_eq!(section, "\n\n**Sources:**\n2. s3://x");
    }
}
