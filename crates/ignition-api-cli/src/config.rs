//! CLI configuration.

use ignition_api_client::GatewayClientConfig;
use std::time::Duration;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required variable not set
    #[error("{0} is not set")]
    Missing(&'static str),
    /// Variable set to an unusable value
    #[error("invalid {name}: {value:?}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Gateway connection settings for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Gateway base URL
    pub host: String,
    /// API token
    pub token: String,
    /// Skip TLS certificate verification
    pub allow_insecure_tls: bool,
    /// Per-request budget
    pub timeout: Duration,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `IGNITION_HOST`: Gateway base URL (required)
    /// - `IGNITION_TOKEN`: API token (required)
    /// - `IGNITION_ALLOW_INSECURE_TLS`: `true`/`1` to skip certificate checks
    /// - `IGNITION_TIMEOUT_SECS`: Per-request timeout in seconds (default 10)
    ///
    /// # Errors
    ///
    /// Returns error if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let host = required("IGNITION_HOST")?;
        let token = required("IGNITION_TOKEN")?;

        let allow_insecure_tls = match lookup("IGNITION_ALLOW_INSECURE_TLS") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                name: "IGNITION_ALLOW_INSECURE_TLS",
                value,
            })?,
        };

        let timeout = match lookup("IGNITION_TIMEOUT_SECS") {
            None => Duration::from_secs(10),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "IGNITION_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            host,
            token,
            allow_insecure_tls,
            timeout,
        })
    }

    /// Client configuration for these settings.
    #[must_use]
    pub fn client_config(&self) -> GatewayClientConfig {
        GatewayClientConfig::new(&self.host, &self.token)
            .with_insecure_tls(self.allow_insecure_tls)
            .with_request_timeout(self.timeout)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn minimal_config() {
        let config = load(&[
            ("IGNITION_HOST", "https://gateway.local:8043"),
            ("IGNITION_TOKEN", "key:secret"),
        ])
        .unwrap();

        assert_eq!(config.host, "https://gateway.local:8043");
        assert!(!config.allow_insecure_tls);
        assert_eq!(config.timeout, Duration::from_secs(10));

        let client = config.client_config();
        assert_eq!(client.token, "key:secret");
        assert_eq!(client.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn host_and_token_are_required() {
        let err = load(&[("IGNITION_TOKEN", "t")]).unwrap_err();
        assert_eq!(err.to_string(), "IGNITION_HOST is not set");

        let err = load(&[("IGNITION_HOST", "http://gw:8088"), ("IGNITION_TOKEN", " ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("IGNITION_TOKEN")));
    }

    #[test]
    fn optional_settings() {
        let config = load(&[
            ("IGNITION_HOST", "https://gw:8043"),
            ("IGNITION_TOKEN", "t"),
            ("IGNITION_ALLOW_INSECURE_TLS", "TRUE"),
            ("IGNITION_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert!(config.allow_insecure_tls);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_bad_values() {
        let base = [("IGNITION_HOST", "http://gw:8088"), ("IGNITION_TOKEN", "t")];

        let err = load(&[base[0], base[1], ("IGNITION_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "IGNITION_TIMEOUT_SECS", .. }));

        let err = load(&[base[0], base[1], ("IGNITION_ALLOW_INSECURE_TLS", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "IGNITION_ALLOW_INSECURE_TLS", .. }));
    }
}
