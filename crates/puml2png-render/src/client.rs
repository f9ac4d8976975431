//! HTTP client for PlantUML server rendering.
//!
//! Diagram source is never posted as a request body: the server expects the
//! deflate-compressed, custom-base64 token as a URL path segment
//! (`{server}/png/{token}`), so rendering is a plain GET.

use std::time::Duration;

use ureq::Agent;

use crate::consts::DEFAULT_TIMEOUT;
use crate::encoding::encode_diagram_source;

/// Failure to obtain an image from the render server.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Connection failure, timeout, or truncated response.
    #[error("transport error: {0}")]
    Transport(String),
    /// Response status with no diagnostic-image convention.
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// Successful status but nothing in the body.
    #[error("server returned an empty image")]
    EmptyImage,
}

/// HTTP client for a PlantUML rendering server.
///
/// Holds a pooled agent so repeated renders (watch mode) reuse connections.
pub struct PlantUmlClient {
    server_url: String,
    agent: Agent,
}

impl PlantUmlClient {
    /// Create a client with the default request timeout.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_timeout(server_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(server_url: impl Into<String>, timeout: Duration) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_owned();
        Self {
            server_url,
            agent: create_agent(timeout),
        }
    }

    /// The configured server URL (without trailing slash).
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Render diagram source to PNG bytes via the remote server.
    ///
    /// A 400 response still yields the body when the server sent one: the
    /// server draws the failure reason into the image itself, which is more
    /// useful to the author than a bare status code. Any other non-200
    /// status, an empty body, or a transport failure is an error.
    pub fn render_png(&self, source: &str) -> Result<Vec<u8>, RenderError> {
        let token = encode_diagram_source(source);
        let url = format!("{}/png/{token}", self.server_url);

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| RenderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        match status {
            200 => {
                let data = body
                    .read_to_vec()
                    .map_err(|e| RenderError::Transport(e.to_string()))?;
                non_empty(data)
            }
            400 => {
                tracing::error!(status, "server rejected diagram source, keeping diagnostic image");
                let data = body
                    .read_to_vec()
                    .map_err(|e| RenderError::Transport(e.to_string()))?;
                non_empty(data)
            }
            _ => {
                tracing::error!(status, "unexpected status from render server");
                Err(RenderError::Status(status))
            }
        }
    }
}

/// An empty body is not a valid artifact, whatever the status said.
fn non_empty(data: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    if data.is_empty() {
        Err(RenderError::EmptyImage)
    } else {
        Ok(data)
    }
}

/// Create an HTTP agent with the specified timeout.
///
/// Status handling stays explicit: 4xx/5xx responses are returned as
/// responses, not mapped to errors by the agent.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
