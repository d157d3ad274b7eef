//! Pass-through storage for the runtime's diagnostic trace.
//!
//! The runtime streams one trace record at a time, each belonging to a
//! processing phase. Records are opaque JSON: nothing here inspects them
//! beyond keeping arrival order per phase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The processing phases the runtime reports trace records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    PreProcessing,
    Orchestration,
    PostProcessing,
}

impl TracePhase {
    pub const ALL: [TracePhase; 3] = [
        TracePhase::PreProcessing,
        TracePhase::Orchestration,
        TracePhase::PostProcessing,
    ];

    /// Key under which the runtime's trace events carry this phase.
    pub fn wire_key(self) -> &'static str {
        match self {
            TracePhase::PreProcessing => "preProcessingTrace",
            TracePhase::Orchestration => "orchestrationTrace",
            TracePhase::PostProcessing => "postProcessingTrace",
        }
    }
}

impl fmt::Display for TracePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TracePhase::PreProcessing => "pre-processing",
            TracePhase::Orchestration => "orchestration",
            TracePhase::PostProcessing => "post-processing",
        };
        write!(f, "{name}")
    }
}

/// Ordered trace records per phase for one runtime call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceLog {
    #[serde(rename = "preProcessingTrace")]
    pre_processing: Vec<serde_json::Value>,
    #[serde(rename = "orchestrationTrace")]
    orchestration: Vec<serde_json::Value>,
    #[serde(rename = "postProcessingTrace")]
    post_processing: Vec<serde_json::Value>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to its phase, preserving arrival order.
    pub fn record(&mut self, phase: TracePhase, record: serde_json::Value) {
        self.phase_mut(phase).push(record);
    }

    pub fn records(&self, phase: TracePhase) -> &[serde_json::Value] {
        match phase {
            TracePhase::PreProcessing => &self.pre_processing,
            TracePhase::Orchestration => &self.orchestration,
            TracePhase::PostProcessing => &self.post_processing,
        }
    }

    pub fn is_empty(&self) -> bool {
        TracePhase::ALL.iter().all(|p| self.records(*p).is_empty())
    }

    pub fn len(&self) -> usize {
        TracePhase::ALL.iter().map(|p| self.records(*p).len()).sum()
    }

    /// The whole log as one JSON value, keyed by wire name (raw display).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn phase_mut(&mut self, phase: TracePhase) -> &mut Vec<serde_json::Value> {
        match phase {
            TracePhase::PreProcessing => &mut self.pre_processing,
            TracePhase::Orchestration => &mut self.orchestration,
            TracePhase::PostProcessing => &mut self.post_processing,
        }
    }
}
