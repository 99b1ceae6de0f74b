//! Redis-backed document store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde_json::Value;

use quill_core::error::StoreError;
use quill_core::ports::DocumentStore;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Document store over Redis string keys holding JSON.
///
/// Uses a connection manager for automatic reconnection and pooling.
pub struct RedisDocumentStore {
    conn: ConnectionManager,
}

impl RedisDocumentStore {
    pub async fn new(config: RedisConfig) -> Result<Self, StoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| StoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis document store");

        Ok(Self { conn })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, StoreError> {
        Self::new(RedisConfig::from_env()).await
    }
}

fn decode(raw: String) -> Result<Value, StoreError> {
    serde_json::from_str(&raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        raw.map(decode).transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value.to_string())
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(())
    }

    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Value>>, StoreError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();

        // Explicit MGET: redis-rs collapses single-key responses otherwise.
        let mut cmd = redis::cmd("MGET");
        for key in keys {
            cmd.arg(key);
        }
        let raw: Vec<Option<String>> = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        raw.into_iter().map(|r| r.map(decode).transpose()).collect()
    }
}
