//! Client facade for the gateway configuration API.
//!
//! [`GatewayClient`] holds the immutable connection settings and the
//! retrying transport. The verbs themselves live next to the endpoints they
//! address (`resources`, `projects`, `encryption`, `redundancy`).

use crate::error::ClientError;
use crate::retry::RetryConfig;
use crate::transport::{Transport, TransportSettings};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Gateway client configuration.
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// Base URL of the gateway (e.g., <http://localhost:8088>)
    pub base_url: String,
    /// API token sent with every request
    pub token: String,
    /// Skip TLS certificate verification
    pub allow_insecure_tls: bool,
    /// Budget for one logical request, retries included
    pub request_timeout: Duration,
    /// Retry policy
    pub retry: RetryConfig,
}

impl Default for GatewayClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8088".to_string(),
            token: String::new(),
            allow_insecure_tls: false,
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
        }
    }
}

impl GatewayClientConfig {
    /// Configuration for `base_url` authenticated with `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    /// Accept self-signed or otherwise unverifiable certificates.
    #[must_use]
    pub fn with_insecure_tls(mut self, allow: bool) -> Self {
        self.allow_insecure_tls = allow;
        self
    }

    /// Set the per-request budget.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn normalized_base_url(&self) -> Result<String, ClientError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| ClientError::Config(format!("invalid base URL {trimmed:?}: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(trimmed.to_string()),
            other => Err(ClientError::Config(format!(
                "unsupported URL scheme {other:?}, expected http or https"
            ))),
        }
    }
}

/// Client for the gateway configuration API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    pub(crate) transport: Arc<Transport>,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is not an `http(s)`
    /// URL, the token cannot be sent as a header, the request timeout is
    /// zero, or the HTTP client cannot be built.
    pub fn new(config: GatewayClientConfig) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url()?;
        if HeaderValue::from_str(&config.token).is_err() {
            return Err(ClientError::Config(
                "API token is not a valid header value".to_string(),
            ));
        }
        if config.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = u64::try_from(config.request_timeout.as_millis()).unwrap_or(u64::MAX),
            max_retries = config.retry.max_retries,
            "creating gateway client"
        );

        let transport = Transport::new(TransportSettings {
            base_url,
            token: config.token,
            allow_insecure_tls: config.allow_insecure_tls,
            request_timeout: config.request_timeout,
            retry: config.retry,
        })?;

        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Create a client with default timeout and retry settings.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayClient::new`].
    pub fn connect(
        host: impl Into<String>,
        token: impl Into<String>,
        allow_insecure_tls: bool,
    ) -> Result<Self, ClientError> {
        Self::new(GatewayClientConfig::new(host, token).with_insecure_tls(allow_insecure_tls))
    }

    /// Normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Retry policy in effect.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        self.transport.retry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_config() {
        let config = GatewayClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8088");
        assert!(config.token.is_empty());
        assert!(!config.allow_insecure_tls);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = GatewayClient::connect("https://gateway.local:8043/", "token", false).unwrap();
        assert_eq!(client.base_url(), "https://gateway.local:8043");
    }

    #[test]
    fn rejects_invalid_urls() {
        for url in ["not a url", "ftp://gateway.local", ""] {
            let err = GatewayClient::connect(url, "token", false).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{url}");
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = GatewayClientConfig::new("http://localhost:8088", "token")
            .with_request_timeout(Duration::ZERO);
        let err = GatewayClient::new(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn rejects_token_that_is_not_a_header_value() {
        for token in ["bad\ntoken", "del\u{7f}"] {
            let err = GatewayClient::connect("http://localhost:8088", token, false).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{token:?}");
        }
        assert!(GatewayClient::connect("http://localhost:8088", "key:secret", false).is_ok());
    }

    #[test]
    fn clones_share_settings() {
        let config = GatewayClientConfig::new("http://localhost:8088", "token")
            .with_retry(RetryConfig::no_retry());
        let client = GatewayClient::new(config).unwrap();
        let clone = client.clone();

        assert_eq!(clone.retry_config().max_retries, 0);
        assert!(Arc::ptr_eq(&client.transport, &clone.transport));
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GatewayClient>();
    }
}
