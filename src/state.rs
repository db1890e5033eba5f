use std::sync::Arc;

use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use sqlx::PgPool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub postgres: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(postgres: PgPool, config: AppConfig) -> Self {
        Self {
            postgres,
            config: Arc::new(config),
        }
    }
}

pub type RedisClient = Pool<RedisConnectionManager>;
