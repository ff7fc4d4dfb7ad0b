//! Сервис приложения: связывает резолвер, источники и поиск

use std::sync::Arc;

use tracing::warn;

use crate::domain::pools::{compute_market_stats, filter_pools, PoolFilter};
use crate::domain::search::{TokenSearchEngine, TokenSearchResult};
use crate::domain::tokens::TokenResolver;
use crate::infrastructure::sources::{BluefinSource, HyperionSource, PoolSource};
use crate::shared::errors::AppError;
use crate::shared::types::{BotConfig, MarketStats, PoolRecord};

pub struct PoolService {
    resolver: Arc<TokenResolver>,
    sources: Vec<Arc<dyn PoolSource>>,
    search_engine: TokenSearchEngine,
}

impl PoolService {
    /// Собрать сервис со всеми зарегистрированными источниками
    pub fn new(config: &BotConfig) -> Self {
        let resolver = Arc::new(TokenResolver::new());

        let hyperion: Arc<dyn PoolSource> = Arc::new(HyperionSource::new(
            config.hyperion.clone(),
            Arc::clone(&resolver),
        ));
        let bluefin: Arc<dyn PoolSource> = Arc::new(BluefinSource::new(
            config.bluefin.clone(),
            Arc::clone(&resolver),
        ));

        let sources = vec![Arc::clone(&hyperion), Arc::clone(&bluefin)];

        let mut search_engine = TokenSearchEngine::new();
        search_engine.register(hyperion);
        search_engine.register(bluefin);

        Self {
            resolver,
            sources,
            search_engine,
        }
    }

    /// Получить символ токена по адресу
    pub fn resolve(&self, address: &str) -> String {
        self.resolver.resolve(address)
    }

    /// Топ пулов: опционально по одному протоколу, с фильтрацией и сортировкой
    pub async fn top_pools(
        &self,
        protocol: Option<&str>,
        filter: &PoolFilter,
        force_refresh: bool,
    ) -> Result<Vec<PoolRecord>, AppError> {
        let mut pools = Vec::new();

        for source in self.matching_sources(protocol)? {
            match source.fetch_pools(force_refresh).await {
                Ok(mut fetched) => pools.append(&mut fetched),
                Err(err) => {
                    // Один протокол запросили явно - отдаем ошибку наверх
                    if protocol.is_some() {
                        return Err(err.into());
                    }
                    warn!("Skipping {} in pool listing: {}", source.protocol_id(), err);
                }
            }
        }

        Ok(filter_pools(&pools, filter))
    }

    /// Поиск токена или пары через все блокчейны
    pub async fn search(&self, query: &str) -> Result<TokenSearchResult, AppError> {
        Ok(self.search_engine.search(query).await?)
    }

    /// Статистика рынка по каждому протоколу
    pub async fn market_overview(
        &self,
        force_refresh: bool,
    ) -> Result<Vec<(String, MarketStats)>, AppError> {
        let mut overview = Vec::new();

        for source in &self.sources {
            match source.fetch_pools(force_refresh).await {
                Ok(pools) => {
                    overview.push((
                        source.display_name().to_string(),
                        compute_market_stats(&pools),
                    ));
                }
                Err(err) => {
                    warn!("Skipping {} in market overview: {}", source.protocol_id(), err);
                }
            }
        }

        Ok(overview)
    }

    fn matching_sources(
        &self,
        protocol: Option<&str>,
    ) -> Result<Vec<Arc<dyn PoolSource>>, AppError> {
        match protocol {
            None => Ok(self.sources.clone()),
            Some(id) => {
                let matched: Vec<Arc<dyn PoolSource>> = self
                    .sources
                    .iter()
                    .filter(|s| s.protocol_id() == id)
                    .cloned()
                    .collect();
                if matched.is_empty() {
                    return Err(AppError::ConfigError(format!("Unknown protocol: {}", id)));
                }
                Ok(matched)
            }
        }
    }
}
