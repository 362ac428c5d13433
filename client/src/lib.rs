//! Collection-endpoint client for roster.
//!
//! # Architecture
//!
//! This crate is the data-access side of the roster boundary. A
//! [`Directory`] owns the single fetch operation against an external
//! collection endpoint and knows nothing about how results are displayed.
//! The presentation side hands it a render callback for the duration of one
//! call; the `Directory` invokes it on success and a separate error callback
//! on failure.
//!
//! Two forms of the fetch operation exist:
//!
//! - [`Directory::fetch`] - returns a future of `Result<ResultSet, FetchError>`
//! - [`Directory::fetch_with`] - the injected-callback form the boundary is
//!   built around; exactly one of the two supplied callbacks fires, exactly
//!   once
//!
//! # Error Handling
//!
//! `fetch_with` never lets a failure escape to the caller as a panic or
//! return value; every failure is delivered through the error callback as a
//! [`FetchError`]. Transport failures, non-success statuses, and malformed
//! payloads are distinct variants, but callers that want the coarse "request
//! failed" view can treat them uniformly.

use roster_types::{Query, ResultSet};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Shared HTTP client, built once.
///
/// Redirects are refused so a call maps to exactly one outbound request.
fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Attempting minimal fallback.");
                reqwest::Client::builder()
                    .redirect(reqwest::redirect::Policy::none())
                    .build()
                    .expect("minimal HTTP client must build; cannot fetch without one")
            })
    })
}

/// Endpoint and per-request tuning for a [`Directory`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoint: Url,
    request_timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Overall deadline for one fetch. Keeps a hanging transport from leaving
    /// a call with neither callback fired.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Why a fetch produced no results.
///
/// The legacy behavior this crate models collapses all three of these into a
/// single "request failed" outcome; the variants exist so diagnostics can say
/// which stage failed, and the presentation layer still treats them uniformly.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("request to collection endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("collection endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The response body was not a JSON array of name records.
    #[error("malformed response payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// The data-access side of the roster boundary.
///
/// Owns the one fetch operation against the collection endpoint. Construct a
/// `Directory` explicitly and hand it to the presentation layer at setup
/// time; there is no ambient shared instance.
///
/// Calls are independent: a `Directory` is `Clone` + `Send` + `Sync`, holds
/// no per-call state, and overlapping fetches resolve their own callbacks in
/// whatever order the endpoint answers.
#[derive(Debug, Clone)]
pub struct Directory {
    config: ClientConfig,
}

impl Directory {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The URL one fetch will hit: the configured endpoint with the raw
    /// query attached as the query string.
    ///
    /// The query is percent-encoded on the way in. The legacy behavior this
    /// models concatenated the raw input after `?` unescaped; encoding it is
    /// a deliberate correctness deviation.
    fn request_url(&self, query: &Query) -> Url {
        let mut url = self.config.endpoint.clone();
        url.set_query(Some(query.as_str()));
        url
    }

    /// Issues exactly one GET against the endpoint and materializes the full
    /// response. No retry, no caching, no partial results: the future
    /// resolves to either the complete ordered [`ResultSet`] or a
    /// [`FetchError`].
    pub async fn fetch(&self, query: &Query) -> Result<ResultSet, FetchError> {
        let url = self.request_url(query);
        tracing::debug!(%url, "fetching name records");

        let response = http_client()
            .get(url)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            tracing::warn!(%status, "collection endpoint returned an error status");
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;
        let results: ResultSet = serde_json::from_str(&body)?;
        tracing::debug!(count = results.len(), "fetch complete");
        Ok(results)
    }

    /// Callback form of [`fetch`](Self::fetch): the injected-callback
    /// boundary itself.
    ///
    /// Exactly one of `on_success` / `on_error` is invoked, exactly once,
    /// never both. Both callbacks are moved into the call and consumed when
    /// it resolves, so no stale handle survives to fire a second time. A
    /// failure is always reported through `on_error`; nothing escapes to the
    /// caller.
    pub async fn fetch_with<S, E>(&self, query: &Query, on_success: S, on_error: E)
    where
        S: FnOnce(ResultSet),
        E: FnOnce(FetchError),
    {
        match self.fetch(query).await {
            Ok(results) => on_success(results),
            Err(err) => on_error(err),
        }
    }
}

/// Reads an error response body for diagnostics, truncated to keep logs sane.
///
/// The cap is applied to raw bytes before UTF-8 decoding, so a cut that lands
/// inside a multibyte character degrades to a replacement character instead
/// of a panic.
async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.bytes().await {
        Ok(body) => {
            if body.len() > MAX_ERROR_BODY_BYTES {
                let text = String::from_utf8_lossy(&body[..MAX_ERROR_BODY_BYTES]);
                format!("{text}...(truncated)")
            } else {
                String::from_utf8_lossy(&body).into_owned()
            }
        }
        Err(_) => String::new(),
    }
}
