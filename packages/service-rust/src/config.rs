use std::time::Duration;

/// Service-level configuration for the board read path and mutation gate.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Name reported as `service` in normalized error details.
    pub service_name: String,
    /// How long a fetched board is served from cache, in milliseconds.
    pub board_cache_ttl_ms: u64,
    /// Fail a fetch when the normalized board violates the domain schema.
    /// When false, violations are only logged.
    pub strict_domain: bool,
    /// Run preflight checks against the current board before posting a
    /// mutation.
    pub preflight: bool,
    pub log: LogConfig,
}

impl ServiceConfig {
    #[must_use]
    pub fn board_cache_ttl(&self) -> Duration {
        Duration::from_millis(self.board_cache_ttl_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "courtboard".to_string(),
            board_cache_ttl_ms: 2_000,
            strict_domain: false,
            preflight: true,
            log: LogConfig::default(),
        }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default `EnvFilter` directive. `RUST_LOG` overrides it.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}
