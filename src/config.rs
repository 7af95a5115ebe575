//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`)
//! - `PORT` - Port used when `LISTEN` is unset (default: `5000`)
//! - `APP_ENV` - `development` or `production` (default: `development`)
//! - `CONTENT_DIR` - Directory of `<id>.json` content files (default: `content/addictions`)
//! - `CACHE_TTL` - Response cache duration in seconds (default: `300`)
//! - `CACHE_CHECK_PERIOD` - Expired-entry sweep interval in seconds (default: `60`)
//! - `CORS_ORIGINS` - Comma-separated allowed origins
//! - `RATE_LIMIT_ENABLED` - Per-IP rate limiting on/off (default: `true`)
//! - `RATE_LIMIT_MAX` - Requests allowed per window per IP (default: `100`)
//! - `RATE_LIMIT_WINDOW_SECONDS` - Rate limit window (default: `900`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://myrehabcentre.com",
    "https://addictionfreelifestyle.netlify.app",
    "http://localhost:3000",
    "http://localhost:5173",
];

/// Deployment environment. Controls whether internal error details reach clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => anyhow::bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub environment: Environment,
    pub content_dir: PathBuf,
    /// Default response cache duration in seconds; also the `max-age` advertised to clients.
    pub cache_ttl_seconds: u64,
    /// Interval between sweeps of expired response cache entries, in seconds.
    pub cache_check_period_seconds: u64,
    pub cors_origins: Vec<String>,
    pub rate_limit_enabled: bool,
    pub rate_limit_max: u32,
    pub rate_limit_window_seconds: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            environment: Environment::Development,
            content_dir: PathBuf::from("content/addictions"),
            cache_ttl_seconds: 300,
            cache_check_period_seconds: 60,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            rate_limit_enabled: true,
            rate_limit_max: 100,
            rate_limit_window_seconds: 900,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_ENV` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = Self::load_listen_addr();

        let environment = match env::var("APP_ENV") {
            Ok(value) => value.parse().context("Failed to parse APP_ENV")?,
            Err(_) => defaults.environment,
        };

        let content_dir = env::var("CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.content_dir);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.cors_origins);

        let rate_limit_enabled = env::var("RATE_LIMIT_ENABLED")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(defaults.rate_limit_enabled);

        Ok(Self {
            listen_addr,
            environment,
            content_dir,
            cache_ttl_seconds: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl_seconds),
            cache_check_period_seconds: parse_var("CACHE_CHECK_PERIOD")
                .unwrap_or(defaults.cache_check_period_seconds),
            cors_origins,
            rate_limit_enabled,
            rate_limit_max: parse_var("RATE_LIMIT_MAX").unwrap_or(defaults.rate_limit_max),
            rate_limit_window_seconds: parse_var("RATE_LIMIT_WINDOW_SECONDS")
                .unwrap_or(defaults.rate_limit_window_seconds),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Resolves the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT`, with `PORT` defaulting to 5000
    fn load_listen_addr() -> String {
        if let Ok(addr) = env::var("LISTEN") {
            return addr;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not a socket address
    /// - `log_format` is not `text` or `json`
    /// - any cache or rate-limit duration is zero
    /// - the rate-limit window is too short to replenish one request per millisecond
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL must be greater than 0");
        }

        if self.cache_check_period_seconds == 0 {
            anyhow::bail!("CACHE_CHECK_PERIOD must be greater than 0");
        }

        if self.rate_limit_enabled {
            if self.rate_limit_max == 0 {
                anyhow::bail!("RATE_LIMIT_MAX must be at least 1");
            }
            if self.rate_limit_window_seconds == 0 {
                anyhow::bail!("RATE_LIMIT_WINDOW_SECONDS must be greater than 0");
            }
            if self.rate_limit_replenish_interval().is_zero() {
                anyhow::bail!(
                    "RATE_LIMIT_WINDOW_SECONDS ({}) is too short for RATE_LIMIT_MAX ({})",
                    self.rate_limit_window_seconds,
                    self.rate_limit_max
                );
            }
        }

        Ok(())
    }

    /// Time to replenish one request slot so that `rate_limit_max` requests
    /// refill over one window.
    pub fn rate_limit_replenish_interval(&self) -> Duration {
        let window_ms = self.rate_limit_window_seconds.saturating_mul(1000);
        Duration::from_millis(window_ms / u64::from(self.rate_limit_max.max(1)))
    }

    pub fn cache_check_period(&self) -> Duration {
        Duration::from_secs(self.cache_check_period_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Environment: {}", self.environment.as_str());
        tracing::info!("  Content directory: {}", self.content_dir.display());
        tracing::info!(
            "  Response cache: ttl {}s, sweep every {}s",
            self.cache_ttl_seconds,
            self.cache_check_period_seconds
        );
        tracing::info!("  CORS origins: {}", self.cors_origins.join(", "));
        if self.rate_limit_enabled {
            tracing::info!(
                "  Rate limit: {} requests / {}s per IP",
                self.rate_limit_max,
                self.rate_limit_window_seconds
            );
        } else {
            tracing::info!("  Rate limit: disabled");
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
