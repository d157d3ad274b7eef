//! Agent-runtime client and session analytics for Courtside.
//!
//! Provides:
//! - A narrow client trait over a managed conversational-agent runtime,
//!   with a reqwest-based production adapter
//! - Event-stream parsing of chunked replies carrying citations and
//!   per-phase trace records
//! - Session management: transcript, token/cost estimates, cumulative
//!   usage tracking

pub mod runtime;
pub mod session;
pub mod streaming;
pub mod trace;
pub mod usage;

use std::time::Duration;

use async_trait::async_trait;

pub use runtime::{RuntimeClient, RuntimeConfig};
pub use session::{ChatSession, Pricing, Role, SessionMetrics, Turn};
pub use trace::{TraceLog, TracePhase};
pub use usage::UsageTracker;

/// One synchronous question-to-answer call against the agent runtime.
/// Implemented by [`RuntimeClient`] in production and by deterministic
/// fakes in tests.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, session_id: &str, input: &str) -> Result<AgentReply, AgentError>;
}

/// A complete reply from the agent runtime, assembled from its event
/// stream. `elapsed` is the wall time of the whole call.
#[derive(Debug, Clone, Default)]
pub struct AgentReply {
    pub text: String,
    pub citations: Vec<Citation>,
    pub trace: TraceLog,
    pub elapsed: Duration,
}

/// A source attribution attached to part of a reply.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Citation {
    pub references: Vec<Reference>,
}

/// One piece of retrieved reference material backing a citation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Reference {
    pub uri: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent API error: {0}")]
    Api(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("timeout")]
    Timeout,
    #[error("agent runtime not configured: {0}")]
    NotConfigured(String),
    #[error("session is busy with another turn")]
    Busy,
}
