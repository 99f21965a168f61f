use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::auth::DEFAULT_BCRYPT_COST;

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub bcrypt_cost: u32,
}

/// Token lifetimes must put the expiry at a representable instant.
fn parse_token_lifetime(raw: &str) -> Result<Duration> {
    let lifetime = humantime::parse_duration(raw)
        .context("JWT_EXPIRES_IN must be a duration such as 7d or 12h")?;
    chrono::Duration::from_std(lifetime)
        .ok()
        .and_then(|lifetime| chrono::Utc::now().checked_add_signed(lifetime))
        .context("JWT_EXPIRES_IN is too large")?;
    Ok(lifetime)
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let jwt_expires_in = parse_token_lifetime(
            &env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "7d".to_string()),
        )?;
        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw.parse().context("BCRYPT_COST must be an integer")?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            jwt_expires_in,
            bcrypt_cost,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
