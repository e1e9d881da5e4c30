use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const MIN_JWT_SECRET_LEN: usize = 32;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 10;
/// Tokens may live at most one year.
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Reads the process environment once at startup.
    ///
    /// `JWT_SECRET` has no default: without it no token can be issued, so the
    /// server refuses to start.
    pub fn from_env() -> AppResult<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                AppError::ServerMisconfiguration("JWT_SECRET is not set".to_string())
            })?;

        let config = Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(jwt_secret),
            jwt_expiration_hours: jwt_expiration_hours_from_env()?,
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_BCRYPT_COST),
        };

        config.warn_on_weak_settings();
        Ok(config)
    }

    fn warn_on_weak_settings(&self) {
        let secret_len = self.jwt_secret.expose_secret().len();
        if secret_len < MIN_JWT_SECRET_LEN {
            log::warn!(
                "JWT_SECRET is only {} characters; use at least {} in production",
                secret_len,
                MIN_JWT_SECRET_LEN
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 10,
            bcrypt_cost: 4,
        }
    }
}

fn jwt_expiration_hours_from_env() -> AppResult<i64> {
    let Ok(raw) = env::var("JWT_EXPIRATION_HOURS") else {
        return Ok(DEFAULT_JWT_EXPIRATION_HOURS);
    };

    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|hours| (1..=MAX_JWT_EXPIRATION_HOURS).contains(hours))
        .ok_or_else(|| {
            AppError::ServerMisconfiguration(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}, got '{}'",
                MAX_JWT_EXPIRATION_HOURS, raw
            ))
        })
}
