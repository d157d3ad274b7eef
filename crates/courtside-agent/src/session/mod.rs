//! Chat session state and the turn processor.
//!
//! A `ChatSession` owns the transcript, the cumulative usage counters,
//! and the most recent citations/trace. `send` runs one full exchange
//! against an [`AgentClient`](crate::AgentClient).

mod exchange;
mod store;
mod turn;

pub use store::{ChatSession, Pricing, SessionMetrics};
pub use turn::{Role, Turn};
