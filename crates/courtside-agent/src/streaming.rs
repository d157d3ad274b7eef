//! Reply event-stream parsing.
//!
//! The runtime answers an invocation with a Server-Sent-Events stream:
//! `chunk` events carry reply text (with optional citation attribution)
//! and `trace` events carry one phase record each. This module parses
//! the SSE framing and decodes each complete event into an [`AgentEvent`].

use futures_util::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::trace::TracePhase;
use crate::{AgentError, Citation, Reference};

/// One decoded event from the reply stream.
#[derive(Debug)]
pub enum AgentEvent {
    /// A piece of reply text plus any citations attributed to it.
    Chunk {
        text: String,
        citations: Vec<Citation>,
    },
    /// One trace record for a processing phase.
    Trace {
        phase: TracePhase,
        record: serde_json::Value,
    },
}

/// Read the SSE body of an invocation response, calling `on_event` for
/// each decoded event. Unrecognized event types are skipped.
pub async fn read_reply_stream(
    response: reqwest::Response,
    on_event: impl FnMut(AgentEvent),
) -> Result<(), AgentError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    read_reply_lines(reader, on_event).await
}

/// SSE framing over any buffered line source. Split out from the HTTP
/// layer so it can be driven from byte slices in tests.
pub(crate) async fn read_reply_lines<R: AsyncBufRead + Unpin>(
    reader: R,
    mut on_event: impl FnMut(AgentEvent),
) -> Result<(), AgentError> {
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| AgentError::Network(e.to_string()))?
    {
        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                if let Some(event) = decode_event(current_event.as_deref(), &current_data) {
                    on_event(event);
                }
                current_data.clear();
            }
            current_event = None;
            continue;
        }

        if let Some(event_type) = line.strip_prefix("event: ") {
            current_event = Some(event_type.to_string());
        } else if let Some(data) = line.strip_prefix("data: ") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        if let Some(event) = decode_event(current_event.as_deref(), &current_data) {
            on_event(event);
        }
    }

    Ok(())
}

/// Decode one complete SSE event into an [`AgentEvent`]. Returns `None`
/// for unknown event types or undecodable payloads.
fn decode_event(event: Option<&str>, data: &str) -> Option<AgentEvent> {
    let json: serde_json::Value = serde_json::from_str(data).ok()?;
    match event {
        Some("chunk") => {
            let text = json["text"].as_str().unwrap_or_default().to_string();
            let citations = json["attribution"]["citations"]
                .as_array()
                .map(|list| list.iter().map(parse_citation).collect())
                .unwrap_or_default();
            Some(AgentEvent::Chunk { text, citations })
        }
        Some("trace") => {
            let inner = &json["trace"];
            TracePhase::ALL.into_iter().find_map(|phase| {
                let record = &inner[phase.wire_key()];
                (!record.is_null()).then(|| AgentEvent::Trace {
                    phase,
                    record: record.clone(),
                })
            })
        }
        _ => None,
    }
}

/// Pull the retrieved-reference URIs out of the runtime's nested
/// citation shape (`retrievedReferences[].location.s3Location.uri`).
fn parse_citation(value: &serde_json::Value) -> Citation {
    let references = value["retrievedReferences"]
        .as_array()
        .map(|refs| {
            refs.iter()
                .filter_map(|r| {
                    r["location"]["s3Location"]["uri"]
                        .as_str()
                        .map(|uri| Reference {
                            uri: uri.to_string(),
                        })
                })
                .collect()
        })
        .unwrap_or_default();
    Citation { references }
}
