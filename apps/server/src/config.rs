//! Server configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//! built-in defaults ──► bistro.toml (optional) ──► BISTRO_* environment
//!        lowest                                          highest
//! ```
//!
//! e.g. `BISTRO_PORT=8080`, `BISTRO_DATABASE_PATH=/var/lib/bistro.db`,
//! `BISTRO_JWT_SECRET=...`.

use bistro_core::{PricingConfig, Rate};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Development-only JWT secret. Refused when `environment = "production"`.
pub const DEV_JWT_SECRET: &str = "bistro-dev-secret-change-in-production";

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// SQLite database file
    pub database_path: String,

    /// "production" hides stack traces in error responses
    pub environment: String,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,

    /// JWT refresh token lifetime in seconds
    pub jwt_refresh_lifetime_secs: i64,

    /// Tax rate as a fraction (0.10 = 10%)
    pub tax_rate: f64,

    /// Service charge rate as a fraction
    pub service_rate: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            bind_addr: "0.0.0.0".to_string(),
            database_path: "bistro.db".to_string(),
            environment: "development".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_access_lifetime_secs: 3600,     // 1 hour
            jwt_refresh_lifetime_secs: 2_592_000, // 30 days
            tax_rate: 0.10,
            service_rate: 0.05,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, `bistro.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let config: ServerConfig = Config::builder()
            .set_default("port", i64::from(defaults.port))?
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("database_path", defaults.database_path)?
            .set_default("environment", defaults.environment)?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_access_lifetime_secs", defaults.jwt_access_lifetime_secs)?
            .set_default("jwt_refresh_lifetime_secs", defaults.jwt_refresh_lifetime_secs)?
            .set_default("tax_rate", defaults.tax_rate)?
            .set_default("service_rate", defaults.service_rate)?
            .add_source(File::with_name("bistro").required(false))
            .add_source(Environment::with_prefix("BISTRO"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and production requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, rate) in [("tax_rate", self.tax_rate), ("service_rate", self.service_rate)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue(name.to_string()));
            }
        }

        if self.jwt_access_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("jwt_access_lifetime_secs".to_string()));
        }
        if self.jwt_refresh_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("jwt_refresh_lifetime_secs".to_string()));
        }

        if self.is_production()
            && (self.jwt_secret == DEV_JWT_SECRET
                || self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN)
        {
            return Err(ConfigError::MissingRequired(
                "jwt_secret (at least 32 characters in production)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Error responses include the error's debug form outside production.
    pub fn expose_error_stack(&self) -> bool {
        !self.is_production()
    }

    /// Rates for the pricing calculator.
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            tax_rate: Rate::from_fraction(self.tax_rate),
            service_rate: Rate::from_fraction(self.service_rate),
        }
    }

    /// `bind_addr:port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing(), PricingConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let config = ServerConfig {
            tax_rate: 1.5,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(ref f)) if f == "tax_rate"));
    }

    #[test]
    fn test_production_requires_real_secret() {
        let mut config = ServerConfig {
            environment: "production".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingRequired(_))));

        config.jwt_secret = "x".repeat(48);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stack_hidden_only_in_production() {
        assert!(ServerConfig::default().expose_error_stack());

        let config = ServerConfig {
            environment: "Production".to_string(),
            ..ServerConfig::default()
        };
        assert!(!config.expose_error_stack());
    }
}
