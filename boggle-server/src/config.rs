use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use boggle_core::DEFAULT_BOARD_SIZE;
use boggle_persistence::connection::DEFAULT_DATABASE_URL;

pub const DEFAULT_PORT: u16 = 60000;
pub const DEFAULT_SERVICE_PREFIX: &str = "/BoggleService.svc";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_SHUTDOWN_GRACE_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub dictionary_path: String,
    pub service_prefix: String,
    pub board_size: usize,
    pub max_body_bytes: usize,
    pub shutdown_grace_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", DEFAULT_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            dictionary_path: env::var("DICTIONARY_PATH")
                .unwrap_or_else(|_| "./dictionary.txt".to_string()),
            service_prefix: env::var("SERVICE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_SERVICE_PREFIX.to_string()),
            board_size: parse_var("BOARD_SIZE", DEFAULT_BOARD_SIZE).max(1),
            max_body_bytes: parse_var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            shutdown_grace_seconds: parse_var(
                "SHUTDOWN_GRACE_SECONDS",
                DEFAULT_SHUTDOWN_GRACE_SECONDS,
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_falls_back() {
        // Names are unique to this test so parallel tests do not race on them
        unsafe {
            env::set_var("BOGGLE_TEST_GOOD_PORT", "8123");
            env::set_var("BOGGLE_TEST_BAD_PORT", "eighty");
        }
        assert_eq!(parse_var("BOGGLE_TEST_GOOD_PORT", DEFAULT_PORT), 8123);
        assert_eq!(parse_var("BOGGLE_TEST_BAD_PORT", DEFAULT_PORT), DEFAULT_PORT);
        assert_eq!(parse_var("BOGGLE_TEST_UNSET_PORT", DEFAULT_PORT), DEFAULT_PORT);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            database_url: "sqlite::memory:".to_string(),
            dictionary_path: "words.txt".to_string(),
            service_prefix: DEFAULT_SERVICE_PREFIX.to_string(),
            board_size: 4,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_grace_seconds: 3,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.shutdown_grace(), Duration::from_secs(3));
    }
}
