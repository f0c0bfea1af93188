//! Application configuration loaded from environment variables.

use std::time::Duration;

use secrecy::SecretString;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `STRICT_ORDER_STATUS`: enforce the order status table (default: `false`)
/// - `SEED_DEMO_DATA`: start with the demo catalog (default: `true`)
/// - `GEMINI_API_KEY` or `API_KEY`: shopping assistant key (optional)
/// - `ADVICE_MODEL`: model name (default: `"gemini-2.5-flash"`)
/// - `ADVICE_TIMEOUT_SECS`: per-request timeout (default: `15`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub strict_order_status: bool,
    pub seed_demo_data: bool,
    pub advice: AdviceConfig,
}

/// Shopping assistant settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AdviceConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: advice::gemini::DEFAULT_MODEL.to_string(),
            timeout: advice::gemini::DEFAULT_TIMEOUT,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(value) => parse_flag(&value).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            strict_order_status: env_flag("STRICT_ORDER_STATUS", defaults.strict_order_status),
            seed_demo_data: env_flag("SEED_DEMO_DATA", defaults.seed_demo_data),
            advice: AdviceConfig {
                api_key,
                model: std::env::var("ADVICE_MODEL").unwrap_or(defaults.advice.model),
                timeout: std::env::var("ADVICE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.advice.timeout),
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The order status policy selected by `STRICT_ORDER_STATUS`.
    pub fn status_policy(&self) -> domain::StatusPolicy {
        if self.strict_order_status {
            domain::StatusPolicy::Strict
        } else {
            domain::StatusPolicy::Permissive
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            strict_order_status: false,
            seed_demo_data: true,
            advice: AdviceConfig::default(),
        }
    }
}
