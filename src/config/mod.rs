use crate::core::{AppError, Result, SalonClock};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Salon local time offset from UTC, in minutes
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::configuration(format!(
                "Invalid LOG_FORMAT '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Argon2 PHC hashes of the accepted API keys
    pub api_key_hashes: Vec<String>,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
                utc_offset_minutes: env::var("SALON_UTC_OFFSET_MINUTES")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()
                    .map_err(|_| AppError::configuration("Invalid SALON_UTC_OFFSET_MINUTES"))?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                api_key_hashes: env::var("API_KEY_HASHES")
                    .map(|hashes| server::split_list(&hashes))
                    .map_err(|_| AppError::configuration("API_KEY_HASHES not set"))?,
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .map_err(|_| AppError::configuration("Invalid RATE_LIMIT_PER_MINUTE"))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::configuration(
                "Rate limit must be greater than 0",
            ));
        }

        if self.security.api_key_hashes.is_empty() {
            return Err(AppError::configuration(
                "API_KEY_HASHES must contain at least one hash",
            ));
        }

        for (index, hash) in self.security.api_key_hashes.iter().enumerate() {
            argon2::PasswordHash::new(hash).map_err(|e| {
                AppError::configuration(format!(
                    "API_KEY_HASHES entry {} is not a valid argon2 hash: {}",
                    index, e
                ))
            })?;
        }

        if self.server.workers == 0 {
            return Err(AppError::configuration("SERVER_WORKERS must be greater than 0"));
        }

        self.database.validate()?;
        self.clock()?;

        Ok(())
    }

    /// Clock resolving the salon's local calendar date
    pub fn clock(&self) -> Result<SalonClock> {
        SalonClock::new(self.app.utc_offset_minutes)
    }
}
