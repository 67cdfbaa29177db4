use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::error::InventoryError;
use crate::inventory::PriceCategoryAggregator;
use crate::models::{PriceCategoryScope, SeatsPerPriceCategory};
use crate::redis_client::RedisClient;

/// Хранилище для закешированных агрегатов.
#[async_trait]
pub trait AggregateCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<SeatsPerPriceCategory>>, InventoryError>;

    async fn set(
        &self,
        key: &str,
        aggregates: &[SeatsPerPriceCategory],
        ttl_secs: u64,
    ) -> Result<(), InventoryError>;
}

#[async_trait]
impl AggregateCache for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<Vec<SeatsPerPriceCategory>>, InventoryError> {
        let mut conn = self.conn.clone();
        let data: Option<String> = conn.get(key).await?;
        let Some(data) = data else {
            return Ok(None);
        };
        let aggregates = serde_json::from_str(&data).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Parse error"))
        })?;
        Ok(Some(aggregates))
    }

    async fn set(
        &self,
        key: &str,
        aggregates: &[SeatsPerPriceCategory],
        ttl_secs: u64,
    ) -> Result<(), InventoryError> {
        let data = serde_json::to_string(aggregates).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Serialize error"))
        })?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, data, ttl_secs).await?;
        Ok(())
    }
}

/// Кеш агрегатов по ценовым категориям поверх любого источника.
///
/// В кеш кладём только разрез "все места": он меняется лишь при правке самой
/// схемы зала. Свободные места всегда читаем из источника. Ошибки кеша только
/// логируем: проверка правил от кеша не зависит.
pub struct CachedAggregator<A, C = RedisClient> {
    inner: A,
    cache: C,
    ttl_secs: u64,
}

impl<A, C> CachedAggregator<A, C> {
    pub fn new(inner: A, cache: C, ttl_secs: u64) -> Self {
        Self { inner, cache, ttl_secs }
    }
}

fn cache_key(org_id: &str, seating_plan_id: &str) -> String {
    format!("seat_rules:aggregates:{}:{}", org_id, seating_plan_id)
}

#[async_trait]
impl<A: PriceCategoryAggregator, C: AggregateCache> PriceCategoryAggregator for CachedAggregator<A, C> {
    async fn load_price_category_aggregates(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        scope: PriceCategoryScope,
    ) -> Result<Vec<SeatsPerPriceCategory>, InventoryError> {
        if scope.only_available() {
            return self
                .inner
                .load_price_category_aggregates(seating_plan_id, org_id, scope)
                .await;
        }

        let key = cache_key(org_id, seating_plan_id);

        // Сначала пробуем кеш
        match self.cache.get(&key).await {
            Ok(Some(aggregates)) => {
                debug!(%key, "price category aggregates cache hit");
                return Ok(aggregates);
            }
            Ok(None) => {}
            Err(e) => warn!(%key, error = %e, "price category aggregates cache read failed"),
        }

        // Если в кеше нет - идем в источник
        let aggregates = self
            .inner
            .load_price_category_aggregates(seating_plan_id, org_id, scope)
            .await?;
        if let Err(e) = self.cache.set(&key, &aggregates, self.ttl_secs).await {
            warn!(%key, error = %e, "price category aggregates cache write failed");
        }
        Ok(aggregates)
    }
}
