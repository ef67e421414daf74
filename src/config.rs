// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Minimum number of options a question must offer.
pub const MIN_QUESTION_OPTIONS: usize = 2;

/// Maximum number of options a question may offer.
pub const MAX_QUESTION_OPTIONS: usize = 10;

/// Maximum length of a single option.
pub const MAX_OPTION_LENGTH: usize = 200;

/// Maximum number of questions, and of participants, in one trivia.
/// Keeps the id lists well under SQLite's bound-parameter limit.
pub const MAX_TRIVIA_MEMBERS: u64 = 500;

const DEFAULT_DATABASE_URL: &str = "sqlite://trivia.db?mode=rwc";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Self {
            database_url,
            database_max_connections,
            host,
            port,
            rust_log,
            log_dir,
            cors_origins,
        }
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://a.test ,, http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 8080,
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: vec![],
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
