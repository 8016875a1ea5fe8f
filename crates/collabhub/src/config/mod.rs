use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::badges::BadgeId;
use crate::compatibility::weights::{
    DEFAULT_COLLABORATION_BONUS, DEFAULT_INTEREST_WEIGHT, DEFAULT_SKILL_WEIGHT,
};
use crate::compatibility::{CompatibilityWeights, WeightsError};

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub badges: BadgeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let weights = CompatibilityWeights::new(
            weight_var("APP_SKILL_WEIGHT", DEFAULT_SKILL_WEIGHT)?,
            weight_var("APP_INTEREST_WEIGHT", DEFAULT_INTEREST_WEIGHT)?,
            weight_var("APP_COLLABORATION_BONUS", DEFAULT_COLLABORATION_BONUS)?,
        )
        .map_err(ConfigError::InvalidWeights)?;

        let inactive_badges = env::var("APP_INACTIVE_BADGES")
            .map(|raw| parse_badge_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig { weights },
            badges: BadgeConfig { inactive_badges },
        })
    }
}

fn weight_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidWeight { name }),
        Err(_) => Ok(default),
    }
}

fn parse_badge_list(raw: &str) -> Vec<BadgeId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(BadgeId::new)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Compatibility weighting used by the matching workflow.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub weights: CompatibilityWeights,
}

/// Catalog adjustments applied at startup.
#[derive(Debug, Clone, Default)]
pub struct BadgeConfig {
    pub inactive_badges: Vec<BadgeId>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWeight { name: &'static str },
    InvalidWeights(WeightsError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeight { name } => write!(f, "{name} must be a number"),
            ConfigError::InvalidWeights(err) => write!(f, "invalid compatibility weights: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidWeight { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights(err) => Some(err),
        }
    }
}
