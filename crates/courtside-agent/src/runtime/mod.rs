//! HTTP adapter for a managed agent runtime.
//!
//! Speaks the Bedrock-Agent-style invocation API: one POST per turn,
//! answered by an event stream of reply chunks and trace records.

mod api;
mod client;
mod config;

pub use client::RuntimeClient;
pub use config::RuntimeConfig;
