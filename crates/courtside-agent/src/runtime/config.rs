//! Agent runtime endpoint configuration.

use std::fmt;

use crate::AgentError;

pub(crate) const DEFAULT_ENDPOINT: &str = "https://bedrock-agent-runtime.us-east-1.amazonaws.com";

/// Connection settings for one agent at a managed runtime.
#[derive(Clone)]
pub struct RuntimeConfig {
    pub endpoint: String,
    pub agent_id: String,
    pub agent_alias_id: String,
    pub token: String,
    /// Ask the runtime to stream per-phase trace records.
    pub enable_trace: bool,
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("endpoint", &self.endpoint)
            .field("agent_id", &self.agent_id)
            .field("agent_alias_id", &self.agent_alias_id)
            .field("token", &"[REDACTED]")
            .field("enable_trace", &self.enable_trace)
            .finish()
    }
}

impl RuntimeConfig {
    pub fn new(
        agent_id: impl Into<String>,
        agent_alias_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            agent_id: agent_id.into(),
            agent_alias_id: agent_alias_id.into(),
            token: token.into(),
            enable_trace: true,
        }
    }

    /// Create config with the token resolved from the environment.
    ///
    /// Resolution order:
    /// 1. `COURTSIDE_AGENT_TOKEN` env var
    /// 2. `~/.courtside/credentials.json` (`{"token": "..."}`)
    pub fn from_env(
        agent_id: impl Into<String>,
        agent_alias_id: impl Into<String>,
    ) -> Result<Self, AgentError> {
        if let Ok(token) = std::env::var("COURTSIDE_AGENT_TOKEN") {
            return Ok(Self::new(agent_id, agent_alias_id, token));
        }

        if let Some(token) = Self::read_credentials_file() {
            return Ok(Self::new(agent_id, agent_alias_id, token));
        }

        Err(AgentError::NotConfigured(
            "set COURTSIDE_AGENT_TOKEN or write ~/.courtside/credentials.json".into(),
        ))
    }

    /// Read the token from `~/.courtside/credentials.json`.
    fn read_credentials_file() -> Option<String> {
        let home = dirs::home_dir()?;
        let path = home.join(".courtside").join("credentials.json");
        let data = std::fs::read_to_string(&path).ok()?;
        let json: serde_json::Value = serde_json::from_str(&data).ok()?;
        json.get("token")?.as_str().map(|s| s.to_string())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_trace(mut self, enable: bool) -> Self {
        self.enable_trace = enable;
        self
    }
}
