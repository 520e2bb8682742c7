use thiserror::Error;

use crate::auth::HashCost;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Record Store settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite:directory.db` or `sqlite::memory:`
    pub url: String,
    /// Pool size
    pub max_connections: u32,
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | sqlite:directory.db | Record Store location |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 5000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | PASSWORD_HASH_MEMORY_KIB | 19456 | argon2 memory cost |
/// | PASSWORD_HASH_ITERATIONS | 2 | argon2 time cost |
/// | PASSWORD_HASH_PARALLELISM | 1 | argon2 lanes |
/// | CORS_ALLOWED_ORIGINS | (any) | Comma separated origin list |
/// | LOG_LEVEL | info | Default tracing level when RUST_LOG is unset |
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub http_host: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Cost factor of the password one-way function
    pub password_hash: HashCost,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = HashCost::default();

        Ok(Self {
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", "sqlite:directory.db"),
                max_connections: parse_env("DB_MAX_CONNECTIONS", 5)?,
            },
            http_host: env_or("HTTP_HOST", "0.0.0.0"),
            http_port: parse_env("HTTP_PORT", 5000)?,
            environment: env_or("ENVIRONMENT", "development"),
            password_hash: HashCost {
                memory_kib: parse_env("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_env("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
                parallelism: parse_env("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
            },
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            log_level: env_or("LOG_LEVEL", "info"),
        })
    }

    /// In-memory database and a cheap hash cost
    pub fn for_tests() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
                max_connections: 1,
            },
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "test".into(),
            password_hash: HashCost::cheap(),
            cors_allowed_origins: Vec::new(),
            log_level: "debug".into(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tests_uses_memory_store() {
        let config = Config::for_tests();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 1);
        assert!(!config.is_production());
        assert_eq!(config.bind_addr(), "127.0.0.1:0");
    }

    #[test]
    fn test_parse_env_default_and_invalid() {
        // Variable names are unique to this test.
        assert_eq!(parse_env("DIRECTORY_TEST_UNSET_PORT", 5000u16).unwrap(), 5000);

        unsafe { std::env::set_var("DIRECTORY_TEST_BAD_PORT", "abc") };
        let err = parse_env("DIRECTORY_TEST_BAD_PORT", 5000u16).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DIRECTORY_TEST_BAD_PORT has an invalid value: abc"
        );
    }
}
