use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;

type UrlParseError = <Url as std::str::FromStr>::Err;

/// Placeholder endpoint used when no remote service URL is configured.
pub const DEFAULT_API_URL: &str =
    "https://your-api-gateway-url.execute-api.ap-southeast-2.amazonaws.com/prod";

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the portal client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub tracking: TrackingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = ApiConfig::normalize_base_url(
            &env::var("PORTAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        )?;
        let timeout = Duration::from_secs(read_u64("PORTAL_HTTP_TIMEOUT_SECS", 30)?);

        let poll_secs = read_u64("PORTAL_POLL_INTERVAL_SECS", 30)?;
        if poll_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                variable: "PORTAL_POLL_INTERVAL_SECS",
            });
        }
        let redirect_ms = read_u64("PORTAL_REDIRECT_DELAY_MS", 2000)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig { base_url, timeout },
            tracking: TrackingConfig {
                poll_interval: Duration::from_secs(poll_secs),
                redirect_delay: Duration::from_millis(redirect_ms),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn read_u64(variable: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { variable }),
        Err(_) => Ok(default),
    }
}

/// Settings for the remote job/application service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::normalize_base_url(base_url)?,
            timeout: Duration::from_secs(30),
        })
    }

    /// Validates the URL and strips trailing slashes so paths can be appended verbatim.
    pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| ConfigError::InvalidApiUrl {
            value: raw.to_string(),
            source,
        })?;
        Ok(trimmed.to_string())
    }
}

/// Timers governing the submit-then-track flow.
#[derive(Debug, Clone, Copy)]
pub struct TrackingConfig {
    pub poll_interval: Duration,
    pub redirect_delay: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            redirect_delay: Duration::from_secs(2),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl {
        value: String,
        source: UrlParseError,
    },
    InvalidNumber {
        variable: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { value, .. } => {
                write!(f, "PORTAL_API_URL '{value}' is not a valid URL")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidApiUrl { source, .. } => Some(source),
            ConfigError::InvalidNumber { .. } => None,
        }
    }
}
