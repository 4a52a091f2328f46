//! HTTP(S) transport
//!
//! Issues a single GET and returns the body verbatim. The status code is
//! not inspected beyond a warning.

use crate::error::SourceError;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("modreq/", env!("CARGO_PKG_VERSION"));

/// Reads requirements from an `http://` or `https://` URI
#[derive(Debug, Clone)]
pub struct HttpSource {
    uri: Url,
    user_agent: String,
}

impl HttpSource {
    /// Creates an HTTP source with the default User-Agent
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Returns the source URI
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Fetches the response body
    pub async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let url = self.uri.as_str();
        let client = Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| {
                SourceError::http_request(url, format!("failed to create HTTP client: {}", e))
            })?;

        debug!(url, "requesting requirements");
        let response = client
            .get(self.uri.clone())
            .send()
            .await
            .map_err(|e| SourceError::http_request(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "requirements server returned a non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::http_body(url, e.to_string()))?;

        Ok(body.to_vec())
    }
}
