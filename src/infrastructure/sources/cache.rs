//! Кэш списка пулов с TTL и stale-fallback
//!
//! Мьютекс удерживается на весь цикл проверка-обновление-запись,
//! поэтому конкурентные обновления одного адаптера схлопываются
//! в один запрос к upstream.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::shared::errors::SourceError;
use crate::shared::types::PoolRecord;

struct CacheEntry {
    data: Vec<PoolRecord>,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

pub struct PoolCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl PoolCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Вернуть кэш если он свежий, иначе обновить через `refresh`.
    ///
    /// При ошибке обновления возвращается устаревший кэш, если он есть;
    /// ошибка уходит наверх только при полном отсутствии кэша.
    pub async fn fetch_with<F, Fut>(
        &self,
        force_refresh: bool,
        refresh: F,
    ) -> Result<Vec<PoolRecord>, SourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<PoolRecord>, SourceError>>,
    {
        let mut slot = self.slot.lock().await;

        if !force_refresh {
            if let Some(entry) = slot.as_ref() {
                if entry.is_fresh(self.ttl) {
                    debug!("Returning cached pools");
                    return Ok(entry.data.clone());
                }
            }
        }

        match refresh().await {
            Ok(data) => {
                *slot = Some(CacheEntry {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(data)
            }
            Err(err) => {
                if let Some(entry) = slot.as_ref() {
                    warn!("Returning stale cache due to API error: {}", err);
                    return Ok(entry.data.clone());
                }
                Err(err)
            }
        }
    }
}
