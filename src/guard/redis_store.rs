use std::collections::HashSet;

use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    errors::{AppError, pool_error},
    guard::PreferenceStore,
    models::redis::RedisKey,
    state::RedisClient,
};

/// Rated-module record kept as a Redis set per client identifier.
#[derive(Clone)]
pub struct RedisPreferenceStore {
    redis: RedisClient,
    client_id: String,
}

impl RedisPreferenceStore {
    pub fn new(redis: RedisClient, client_id: impl Into<String>) -> Self {
        Self {
            redis,
            client_id: client_id.into(),
        }
    }

    pub async fn connect(redis_url: &str, client_id: impl Into<String>) -> Result<Self, AppError> {
        let manager = bb8_redis::RedisConnectionManager::new(redis_url)?;
        let pool = bb8::Pool::builder().build(manager).await?;
        Ok(Self::new(pool, client_id))
    }

    fn key(&self) -> String {
        RedisKey::rated_modules(&self.client_id)
    }
}

#[async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn rated_modules(&self) -> Result<HashSet<Uuid>, AppError> {
        let mut conn = self.redis.get().await.map_err(pool_error)?;

        let members: Vec<String> = conn
            .smembers(self.key())
            .await
            .map_err(AppError::RedisCommandError)?;

        let mut rated = HashSet::with_capacity(members.len());
        for member in members {
            match Uuid::parse_str(&member) {
                Ok(id) => {
                    rated.insert(id);
                }
                Err(e) => tracing::warn!("Skipping malformed rated module id '{}': {}", member, e),
            }
        }

        Ok(rated)
    }

    async fn record_rated(&self, module_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.redis.get().await.map_err(pool_error)?;

        let _: () = conn
            .sadd(self.key(), module_id.to_string())
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut conn = self.redis.get().await.map_err(pool_error)?;

        let _: () = conn
            .del(self.key())
            .await
            .map_err(AppError::RedisCommandError)?;

        Ok(())
    }
}
