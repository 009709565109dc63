//! Process configuration, read once at startup and passed down explicitly.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Prometheus-compatible backend. `None` means no backend.
    pub prometheus_url: Option<String>,
    pub bind_addr: String,
    pub port: u16,
    pub query_timeout: Duration,
    pub log_dir: PathBuf,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prometheus_url: None,
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            log_dir: PathBuf::from("logs"),
            debug_mode: false,
        }
    }
}

impl AppConfig {
    /// Build from process environment. Call `dotenvy::dotenv()` first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let prometheus_url = lookup("PROMETHEUS_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let bind_addr = lookup("GREENCOST_BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let port = parse_or("PORT", lookup("PORT"), defaults.port);

        let timeout_secs = parse_or(
            "GREENCOST_QUERY_TIMEOUT_SECS",
            lookup("GREENCOST_QUERY_TIMEOUT_SECS"),
            DEFAULT_QUERY_TIMEOUT_SECS,
        );

        let log_dir = lookup("GREENCOST_LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let debug_mode = lookup("GREENCOST_DEBUG_MODE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            prometheus_url,
            bind_addr,
            port,
            query_timeout: Duration::from_secs(timeout_secs.max(1)),
            log_dir,
            debug_mode,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Debug,
{
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using default {:?}", v, key, default);
            default
        }),
        None => default,
    }
}
