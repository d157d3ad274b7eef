//! AgentClient trait implementation for RuntimeClient.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::streaming::{read_reply_stream, AgentEvent};
use crate::{AgentClient, AgentError, AgentReply};

use super::client::RuntimeClient;

#[async_trait]
impl AgentClient for RuntimeClient {
    async fn invoke(&self, session_id: &str, input: &str) -> Result<AgentReply, AgentError> {
        let started = Instant::now();
        let body = self.build_request_body(input);

        debug!(agent = %self.config.agent_id, session = %session_id, "agent runtime request");

        let response = self
            .http
            .post(self.invoke_url(session_id))
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout
                } else {
                    AgentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AgentError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AgentError::Api(format!("HTTP {status}: {text}")));
        }

        let mut reply = AgentReply::default();
        read_reply_stream(response, |event| match event {
            AgentEvent::Chunk {
                text,
                mut citations,
            } => {
                reply.text.push_str(&text);
                reply.citations.append(&mut citations);
            }
            AgentEvent::Trace { phase, record } => reply.trace.record(phase, record),
        })
        .await?;

        if reply.text.is_empty() {
            warn!("agent reply stream carried no text");
        }

        reply.elapsed = started.elapsed();
        Ok(reply)
    }
}
