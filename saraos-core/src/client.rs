//! HTTP uplink to the SARA backend

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Uplink errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error calling the uplink: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    #[error("uplink returned an invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl ClientError {
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Result of one settled chat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The backend answered with a reply.
    Reply(String),
    /// The call completed but the payload reported an error.
    Reported(String),
    /// The payload carried neither a reply nor an error.
    Empty,
}

/// Transport seam over the chat backend. The TUI and the tests only ever
/// talk to this trait; [`ChatClient`] is the reqwest implementation.
#[async_trait]
pub trait Uplink: Send + Sync {
    /// Issues one chat call carrying the user message.
    async fn send(&self, message: &str) -> Result<ChatOutcome, ClientError>;

    /// Health check against the endpoint root.
    async fn probe(&self) -> Result<String, ClientError>;
}

/// Reqwest-backed chat client
#[derive(Clone)]
pub struct ChatClient {
    endpoint: String,
    http: Client,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build URL from endpoint and path
    fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Uplink for ChatClient {
    async fn send(&self, message: &str) -> Result<ChatOutcome, ClientError> {
        let url = self.build_url("/chat");

        info!(chars = message.len(), "Sending message to SARA backend");

        // The status code is not inspected: a JSON body counts as a
        // completed call whatever the code, matching the backend contract.
        let reply: ChatReply = self
            .http
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(ClientError::network)?
            .json()
            .await
            .map_err(ClientError::network)?;
        debug!("Received chat payload from backend");

        Ok(reply.into_outcome())
    }

    async fn probe(&self) -> Result<String, ClientError> {
        let url = self.build_url("/");

        debug!("Probing SARA backend health");
        let reply: ProbeReply = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::network)?
            .json()
            .await
            .map_err(ClientError::network)?;

        reply
            .status
            .ok_or_else(|| ClientError::invalid_response("missing status field"))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    response: Option<String>,
    error: Option<String>,
}

impl ChatReply {
    fn into_outcome(self) -> ChatOutcome {
        match (self.response, self.error) {
            (Some(text), _) => ChatOutcome::Reply(text),
            (None, Some(text)) => ChatOutcome::Reported(text),
            (None, None) => ChatOutcome::Empty,
        }
    }
}

#[derive(Deserialize)]
struct ProbeReply {
    status: Option<String>,
}
