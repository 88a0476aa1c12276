//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the load-balanced client subsystem.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Logical service definitions and their instances.
    pub services: Vec<ServiceConfig>,

    /// Retry configuration.
    pub retry: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A logical service and the endpoints backing it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Logical service name used as the host of outbound request URIs.
    pub name: String,

    /// Instance addresses (e.g. "127.0.0.1:3000").
    pub endpoints: Vec<String>,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries. Tri-state: unset defaults to enabled whenever the
    /// retry capability is present at startup.
    pub enabled: Option<bool>,

    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_enabled_is_unset_by_default() {
        let config = ClientConfig::default();
        assert_eq!(config.retry.enabled, None);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn retry_enabled_parses_tri_state() {
        let unset: ClientConfig = toml::from_str("[retry]\nmax_attempts = 5\n").unwrap();
        assert_eq!(unset.retry.enabled, None);
        assert_eq!(unset.retry.max_attempts, 5);

        let off: ClientConfig = toml::from_str("[retry]\nenabled = false\n").unwrap();
        assert_eq!(off.retry.enabled, Some(false));

        let on: ClientConfig = toml::from_str("[retry]\nenabled = true\n").unwrap();
        assert_eq!(on.retry.enabled, Some(true));
    }

    #[test]
    fn services_parse_from_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            [[services]]
            name = "svc-a"
            endpoints = ["127.0.0.1:3000", "127.0.0.1:3001"]
            "#,
        )
        .unwrap();
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].endpoints.len(), 2);
    }
}
