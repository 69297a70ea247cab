//! Authenticated JSON transport with classified retries.
//!
//! This is the only place that performs network I/O. One [`Transport`] owns
//! one `reqwest` connection pool; clones share it.

use crate::context::CallContext;
use crate::error::ClientError;
use crate::retry::{parse_retry_after, RetryConfig};
use reqwest::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, Response};
use std::time::Duration;

/// Header carrying the gateway API token.
pub const TOKEN_HEADER: &str = "X-Ignition-API-Token";

const JSON: &str = "application/json";
const TEXT: &str = "text/plain";

/// Settings the transport needs from the client configuration.
#[derive(Debug, Clone)]
pub(crate) struct TransportSettings {
    pub base_url: String,
    pub token: String,
    pub allow_insecure_tls: bool,
    pub request_timeout: Duration,
    pub retry: RetryConfig,
}

/// Result of a single attempt.
enum Attempt {
    Success(Vec<u8>),
    Retriable {
        error: ClientError,
        retry_after: Option<Duration>,
    },
    Fatal(ClientError),
}

/// Executes gateway requests.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: Client,
    settings: TransportSettings,
}

impl Transport {
    pub(crate) fn new(settings: TransportSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder().connect_timeout(settings.request_timeout);

        if settings.allow_insecure_tls {
            tracing::warn!(
                base_url = %settings.base_url,
                "TLS certificate verification disabled"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, settings })
    }

    pub(crate) fn retry(&self) -> &RetryConfig {
        &self.settings.retry
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Execute a JSON request under the retry policy.
    ///
    /// Returns the response body of the first 2xx reply (possibly empty).
    pub(crate) async fn execute(
        &self,
        ctx: &CallContext,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{path}", self.settings.base_url);
        ctx.run(
            self.settings.request_timeout,
            self.execute_with_retry(method, &url, body.as_deref()),
        )
        .await
    }

    /// Execute a plain-text `POST` exactly once, outside the retry policy.
    pub(crate) async fn execute_text_once(
        &self,
        ctx: &CallContext,
        path: &str,
        body: String,
    ) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}{path}", self.settings.base_url);
        ctx.run(self.settings.request_timeout, self.send_text(&url, body))
            .await
    }

    async fn send_text(&self, url: &str, body: String) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(url, "POST text/plain (not retried)");
        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, &self.settings.token)
            .header(CONTENT_TYPE, TEXT)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(ClientError::from_status(status.as_u16(), &bytes))
        }
    }

    async fn execute_with_retry(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ClientError> {
        let retry = &self.settings.retry;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            tracing::debug!(%method, url, attempt = attempts, "request");

            let (error, retry_after) = match self.attempt(&method, url, body).await {
                Attempt::Success(bytes) => return Ok(bytes),
                Attempt::Fatal(error) => return Err(error),
                Attempt::Retriable { error, retry_after } => (error, retry_after),
            };

            if attempts > retry.max_retries {
                if retry.max_retries == 0 {
                    return Err(error);
                }
                return Err(ClientError::RetriesExhausted {
                    attempts,
                    last: error.to_string(),
                });
            }

            let wait = retry.backoff(attempts, retry_after);
            tracing::warn!(
                %method,
                url,
                attempt = attempts,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "retrying request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    async fn attempt(&self, method: &Method, url: &str, body: Option<&[u8]>) -> Attempt {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(TOKEN_HEADER, &self.settings.token)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        match request.send().await {
            Ok(response) => classify(response).await,
            Err(e) => classify_send_error(e),
        }
    }
}

/// A request that could not be built never reaches the network.
fn classify_send_error(e: reqwest::Error) -> Attempt {
    if e.is_builder() {
        Attempt::Fatal(ClientError::Request(e))
    } else {
        Attempt::Retriable {
            error: ClientError::Request(e),
            retry_after: None,
        }
    }
}

async fn classify(response: Response) -> Attempt {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after);

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Attempt::Retriable {
                error: ClientError::Request(e),
                retry_after: None,
            }
        }
    };

    if status.is_success() {
        Attempt::Success(bytes.to_vec())
    } else if RetryConfig::is_retriable(status) {
        Attempt::Retriable {
            error: ClientError::from_status(status.as_u16(), &bytes),
            retry_after,
        }
    } else {
        Attempt::Fatal(ClientError::from_status(status.as_u16(), &bytes))
    }
}
