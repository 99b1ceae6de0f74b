//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "redis")]
use quill_infra::RedisConfig;
#[cfg(feature = "s3")]
use quill_infra::S3Config;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Redis document store; `None` falls back to the in-memory store.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
    /// S3 blob store; `None` falls back to the in-memory store.
    #[cfg(feature = "s3")]
    pub s3: Option<S3Config>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "redis")]
            redis: env::var("REDIS_URL").ok().map(|_| RedisConfig::from_env()),
            #[cfg(feature = "s3")]
            s3: S3Config::from_env(),
        }
    }
}
