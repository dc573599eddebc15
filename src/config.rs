//! Configuration for the fetcher and the sample app
//!
//! Both programs read their settings from the process environment once at
//! startup. Every recognized key and its default lives here:
//!
//! - `DD_API_KEY`: Datadog API key (secret, sent as-is even when empty)
//! - `DD_APP_KEY`: Datadog application key (optional secret)
//! - `DD_SITE`: Datadog site domain (default: datadoghq.com)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP/HTTP traces endpoint
//!   (default: http://localhost:4318/v1/traces)

use std::fmt;
use std::time::Duration;

/// Service name shared by the fetcher query and the sample app's tracer
pub const SERVICE_NAME: &str = "sample-booking-app";

pub const DEFAULT_SITE: &str = "datadoghq.com";
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4318/v1/traces";

/// URLs the sample app calls after the booking workload
pub const OUTBOUND_URLS: &[&str] = &[
    "https://www.example.com",
    "https://www.google.com",
    "https://www.amazon.com",
];

/// A secret string that never shows up in `Debug` or `Display` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for putting on the wire
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First `n` characters, enough to tell keys apart in console output
    pub fn prefix(&self, n: usize) -> String {
        self.0.chars().take(n).collect()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Settings for the Datadog trace fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_key: Secret,
    pub app_key: Option<Secret>,
    /// Site domain, e.g. `datadoghq.com` or `datadoghq.eu`
    pub site: String,
    /// Service whose traces are queried
    pub service: String,
}

impl FetcherConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match lookup("DD_API_KEY") {
            Some(key) => Secret::new(key),
            None => {
                tracing::warn!("DD_API_KEY is not set, requests will be sent without a key");
                Secret::new("")
            }
        };
        let app_key = lookup("DD_APP_KEY")
            .filter(|k| !k.is_empty())
            .map(Secret::new);
        let site = lookup("DD_SITE").unwrap_or_else(|| DEFAULT_SITE.to_string());

        Self {
            api_key,
            app_key,
            site,
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Base URL of the Datadog API for the configured site
    pub fn api_base(&self) -> String {
        format!("https://api.{}", self.site)
    }
}

/// Settings for the synthetic trace generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub service_name: String,
    pub otlp_endpoint: String,
    /// Number of simulated bookings
    pub bookings: usize,
    pub outbound_urls: Vec<String>,
    /// Socket timeout for the outbound GET calls
    pub request_timeout: Duration,
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string());

        Self {
            otlp_endpoint,
            ..Self::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service_name: SERVICE_NAME.to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            bookings: 5,
            outbound_urls: OUTBOUND_URLS.iter().map(|u| u.to_string()).collect(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_fetcher_defaults() {
        let config = FetcherConfig::from_lookup(lookup_from(&[("DD_API_KEY", "abcdef123456")]));
        assert_eq!(config.site, "datadoghq.com");
        assert_eq!(config.service, "sample-booking-app");
        assert_eq!(config.api_key.expose(), "abcdef123456");
        assert!(config.app_key.is_none());
        assert_eq!(config.api_base(), "https://api.datadoghq.com");
    }

    #[test]
    fn test_fetcher_missing_key_is_empty() {
        let config = FetcherConfig::from_lookup(lookup_from(&[("DD_SITE", "datadoghq.eu")]));
        assert!(config.api_key.is_empty());
        assert_eq!(config.api_base(), "https://api.datadoghq.eu");
    }

    #[test]
    fn test_blank_app_key_ignored() {
        let config = FetcherConfig::from_lookup(lookup_from(&[
            ("DD_API_KEY", "k"),
            ("DD_APP_KEY", ""),
        ]));
        assert!(config.app_key.is_none());
    }

    #[test]
    fn test_secret_redacted() {
        let secret = Secret::new("supersecretvalue");
        assert_eq!(format!("{:?}", secret), "Secret(***)");
        assert_eq!(format!("{}", secret), "***");
        assert_eq!(secret.prefix(5), "super");
        assert_eq!(Secret::new("ab").prefix(5), "ab");
    }

    #[test]
    fn test_generator_endpoint_override() {
        let config = GeneratorConfig::from_lookup(lookup_from(&[(
            "OTEL_EXPORTER_OTLP_ENDPOINT",
            "http://collector:4318/v1/traces",
        )]));
        assert_eq!(config.otlp_endpoint, "http://collector:4318/v1/traces");
        assert_eq!(config.bookings, 5);
        assert_eq!(config.outbound_urls.len(), 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_generator_defaults() {
        let config = GeneratorConfig::from_lookup(|_| None);
        assert_eq!(config.otlp_endpoint, DEFAULT_OTLP_ENDPOINT);
        assert_eq!(config.service_name, SERVICE_NAME);
    }
}
