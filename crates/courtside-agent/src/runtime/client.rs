//! Runtime client struct, URL and request-body building.

use super::config::RuntimeConfig;

/// Client for a Bedrock-Agent-style runtime.
pub struct RuntimeClient {
    pub(crate) config: RuntimeConfig,
    pub(crate) http: reqwest::Client,
}

impl RuntimeClient {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Invocation URL for one session:
    /// `{endpoint}/agents/{agent}/agentAliases/{alias}/sessions/{session}/text`.
    pub(crate) fn invoke_url(&self, session_id: &str) -> String {
        format!(
            "{}/agents/{}/agentAliases/{}/sessions/{}/text",
            self.config.endpoint.trim_end_matches('/'),
            self.config.agent_id,
            self.config.agent_alias_id,
            session_id,
        )
    }

    pub(crate) fn build_request_body(&self, input: &str) -> serde_json::Value {
        serde_json::json!({
            "inputText": input,
            "enableTrace": self.config.enable_trace,
        })
    }
}
