use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default = "default_false")]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: default_false() }
    }
}

/// Outbound transport configuration
///
/// The redirect and decompression policy is fixed: the capture client never
/// follows redirects and never decodes bodies on its own. Only connection
/// management is configurable.
#[derive(Debug, Deserialize, Clone)]
pub struct TransportConfig {
    /// TCP (and TLS) connect timeout in milliseconds
    /// Default: 10000 (10 seconds)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// Overall timeout for one exchange, including the full body, in milliseconds
    /// 0 disables the timeout
    /// Default: 0
    #[serde(default)]
    pub request_timeout_ms: u64,
    /// How long idle pooled connections are kept, in seconds
    /// Default: 90
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_secs: u64,
    /// Maximum idle connections kept per host
    /// Default: 16
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: 0,
            pool_idle_timeout_secs: default_pool_idle_timeout(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory the encoded records are written to
    /// Created on startup if missing
    pub output_dir: PathBuf,
    /// User-Agent stored in every recorded request
    /// Should match the UA of the browser session being recorded
    pub user_agent: String,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Outbound transport configuration
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_false() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_timeout() -> u64 {
    10_000
}

fn default_pool_idle_timeout() -> u64 {
    90
}

fn default_pool_max_idle_per_host() -> usize {
    16
}
