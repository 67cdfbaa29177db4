use redis::{aio::ConnectionManager, Client};

use crate::config::RedisConfig;

#[derive(Clone)]
pub struct RedisClient {
    pub conn: ConnectionManager,
}

impl RedisClient {
    // ConnectionManager сам переподключается после обрыва
    pub async fn connect(config: &RedisConfig) -> redis::RedisResult<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        Ok(RedisClient { conn })
    }
}
