use std::{env, str::FromStr, time::Duration};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid LOG_FORMAT '{0}': expected 'json' or 'pretty'")]
    InvalidLogFormat(String),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for CloudWatch.
    Json,
    /// Human readable output for local runs.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Function configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Product table name (default: "Product")
    pub table_name: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: none)
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// CloudWatch namespace for EMF metrics (default: "ProductManager")
    pub metrics_namespace: String,
    /// Log output format (default: json)
    pub log_format: LogFormat,
    /// Maximum polls while waiting for a new table to become active (default: 60)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_activation_attempts: u32,
    /// Delay between activation polls in milliseconds (default: 2,000)
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_activation_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Product table name (default: "Product")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (optional)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `METRICS_NAMESPACE` - EMF namespace (default: "ProductManager")
    /// - `LOG_FORMAT` - `json` or `pretty` (default: "json")
    /// - `TABLE_ACTIVATION_ATTEMPTS` - Activation polls (default: 60)
    /// - `TABLE_ACTIVATION_DELAY_MS` - Delay between polls (default: 2,000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Json,
        };

        Ok(Self {
            table_name: lookup("TABLE_NAME").unwrap_or_else(|| "Product".to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            metrics_namespace: lookup("METRICS_NAMESPACE")
                .unwrap_or_else(|| "ProductManager".to_string()),
            log_format,
            table_activation_attempts: lookup("TABLE_ACTIVATION_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            table_activation_delay_ms: lookup("TABLE_ACTIVATION_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(2_000),
        })
    }

    /// Get the activation poll delay as a Duration.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub fn table_activation_delay(&self) -> Duration {
        Duration::from_millis(self.table_activation_delay_ms)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.table_name, "Product");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.metrics_namespace, "ProductManager");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.table_activation_attempts, 60);
        assert_eq!(config.table_activation_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TABLE_NAME", "Product-dev"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("AWS_REGION", "eu-west-1"),
            ("METRICS_NAMESPACE", "Saas/Products"),
            ("LOG_FORMAT", "Pretty"),
            ("TABLE_ACTIVATION_ATTEMPTS", "5"),
            ("TABLE_ACTIVATION_DELAY_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.table_name, "Product-dev");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.metrics_namespace, "Saas/Products");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.table_activation_attempts, 5);
        assert_eq!(config.table_activation_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_unparseable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("TABLE_ACTIVATION_ATTEMPTS", "many"),
            ("TABLE_ACTIVATION_DELAY_MS", "-1"),
        ]))
        .unwrap();

        assert_eq!(config.table_activation_attempts, 60);
        assert_eq!(config.table_activation_delay_ms, 2_000);
    }

    #[test]
    fn test_empty_endpoint_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("AWS_ENDPOINT_URL", "")])).unwrap();
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_invalid_log_format() {
        let result = Config::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")]));
        assert_eq!(result, Err(ConfigError::InvalidLogFormat("xml".to_string())));
    }

    #[test]
    fn test_target_display() {
        let local = Config::from_lookup(lookup_from(&[(
            "AWS_ENDPOINT_URL",
            "http://localhost:8000",
        )]))
        .unwrap();
        let remote = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(local.target_display(), "Local DynamoDB (http://localhost:8000)");
        assert_eq!(remote.target_display(), "AWS DynamoDB (region: us-east-1)");
    }
}
