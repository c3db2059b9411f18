//! Status-page fetching.
//!
//! The pipeline only needs "give me the body of this URL as text", so that is
//! all `PageSource` asks for. `HttpSource` is the real implementation; tests
//! substitute canned pages.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::error::IngestError;

const USER_AGENT: &str = concat!("sf-covid/", env!("CARGO_PKG_VERSION"));

/// Something that can produce the text of a page.
pub trait PageSource {
    /// Fetch `url` and return its fully-buffered body.
    fn fetch_text(&self, url: &str) -> Result<String, IngestError>;
}

/// Blocking HTTP(S) source with a request timeout.
///
/// Redirects are not followed: any status outside `[200, 300)` is a failure.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IngestError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String, IngestError> {
        debug!(url, "fetching status page");

        let resp = self.client.get(url).send().map_err(|e| IngestError::Fetch {
            url: url.to_string(),
            status: None,
            reason: if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                format!("request failed: {e}")
            },
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("HTTP {status}"),
            });
        }

        let body = resp.bytes().map_err(|e| IngestError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            reason: format!("failed to read response body: {e}"),
        })?;

        debug!(bytes = body.len(), status = status.as_u16(), "status page received");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
