//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use asklocal_infra::{DatabaseConfig, JwtConfig};

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the seeded in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Country whose locations may only come from seed data.
    pub home_country_code: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            home_country_code: env::var("HOME_COUNTRY_CODE")
                .map(|code| code.trim().to_uppercase())
                .unwrap_or_else(|_| "AU".to_string()),
            jwt: Self::jwt_from_env(),
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());

        // Warn if using default secret in production
        if secret == DEFAULT_JWT_SECRET {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        JwtConfig {
            secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| JwtConfig::default().issuer),
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
