//! Движок поиска токенов через все блокчейны и протоколы
//!
//! Запрос "APT" ищет любые пулы с токеном, "APT-USDT" (или "APT/USDT") -
//! конкретную пару. Fan-out по всем зарегистрированным источникам идет
//! параллельно; отказ одного источника логируется и не прерывает поиск.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info};

use crate::infrastructure::sources::PoolSource;
use crate::shared::errors::SearchError;
use crate::shared::types::PoolRecord;

/// Результат для одного протокола
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolResult {
    pub protocol_id: String,
    pub protocol_name: String,
    pub pool_count: usize,
    pub total_tvl: f64,
    pub best_apr: f64,
    pub pools: Vec<PoolRecord>,
}

/// Результат для одного блокчейна
#[derive(Debug, Clone, Serialize)]
pub struct BlockchainResult {
    pub chain_id: String,
    pub chain_name: String,
    pub pool_count: usize,
    pub total_tvl: f64,
    pub best_apr: f64,
    pub protocols: Vec<ProtocolResult>,
}

/// Результат поиска токена
#[derive(Debug, Clone, Serialize)]
pub struct TokenSearchResult {
    pub token: String,
    pub total_pools: usize,
    pub blockchains: Vec<BlockchainResult>,
}

/// Распарсенный поисковый запрос
#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchQuery {
    Single(String),
    Pair(String, String),
}

impl SearchQuery {
    /// Нормализация: верхний регистр, "/" -> "-", трим.
    /// Пара обязана содержать ровно два токена.
    fn parse(raw: &str) -> Result<(String, Self), SearchError> {
        let normalized = raw.to_uppercase().replace('/', "-").trim().to_string();

        if normalized.contains('-') {
            let tokens: Vec<&str> = normalized.split('-').collect();
            if tokens.len() != 2 || tokens.iter().any(|t| t.is_empty()) {
                return Err(SearchError::InvalidQuery(normalized));
            }
            let query = SearchQuery::Pair(tokens[0].to_string(), tokens[1].to_string());
            Ok((normalized, query))
        } else {
            Ok((normalized.clone(), SearchQuery::Single(normalized)))
        }
    }

    /// Точное совпадение символа (без учета регистра), не подстрока
    fn matches(&self, pool: &PoolRecord) -> bool {
        let side_x = pool.token_x_symbol.to_uppercase();
        let side_y = pool.token_y_symbol.to_uppercase();

        match self {
            SearchQuery::Single(token) => side_x == *token || side_y == *token,
            SearchQuery::Pair(token_a, token_b) => {
                // Неупорядоченное сравнение пары
                (side_x == *token_a && side_y == *token_b)
                    || (side_x == *token_b && side_y == *token_a)
            }
        }
    }
}

fn chain_display_name(chain_id: &str) -> String {
    match chain_id {
        "aptos" => "Aptos".to_string(),
        "sui" => "Sui".to_string(),
        "bsc" => "BSC".to_string(),
        "ethereum" => "Ethereum".to_string(),
        "solana" => "Solana".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

pub struct TokenSearchEngine {
    sources: Vec<Arc<dyn PoolSource>>,
}

impl TokenSearchEngine {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Зарегистрировать источник (пара блокчейн/протокол)
    pub fn register(&mut self, source: Arc<dyn PoolSource>) {
        self.sources.push(source);
    }

    /// Поиск токена или пары через все блокчейны
    pub async fn search(&self, raw_query: &str) -> Result<TokenSearchResult, SearchError> {
        let (normalized, query) = SearchQuery::parse(raw_query)?;
        info!("Searching for: {}", normalized);

        // Параллельный fan-out: каждый источник со своим кэшем независим
        let fetches = self.sources.iter().map(|source| async move {
            let result = source.fetch_pools(false).await;
            (source, result)
        });

        let mut protocol_results: Vec<(String, ProtocolResult)> = Vec::new();

        for (source, result) in join_all(fetches).await {
            let pools = match result {
                Ok(pools) => pools,
                Err(err) => {
                    error!(
                        "Error searching in {}/{}: {}",
                        source.chain_id(),
                        source.protocol_id(),
                        err
                    );
                    continue;
                }
            };

            let mut matched: Vec<PoolRecord> =
                pools.into_iter().filter(|p| query.matches(p)).collect();
            if matched.is_empty() {
                continue;
            }

            matched.sort_by(|a, b| b.tvl_usd.total_cmp(&a.tvl_usd));

            let total_tvl: f64 = matched.iter().map(|p| p.tvl_usd).sum();
            let best_apr = matched
                .iter()
                .map(|p| p.total_apr)
                .fold(0.0_f64, f64::max);

            protocol_results.push((
                source.chain_id().to_string(),
                ProtocolResult {
                    protocol_id: source.protocol_id().to_string(),
                    protocol_name: source.display_name().to_string(),
                    pool_count: matched.len(),
                    total_tvl,
                    best_apr,
                    pools: matched,
                },
            ));
        }

        // Группируем по блокчейнам в порядке регистрации источников
        let chain_ids: Vec<String> = {
            let mut seen = HashSet::new();
            protocol_results
                .iter()
                .filter(|(chain_id, _)| seen.insert(chain_id.clone()))
                .map(|(chain_id, _)| chain_id.clone())
                .collect()
        };

        let mut blockchains: Vec<BlockchainResult> = chain_ids
            .into_iter()
            .map(|chain_id| {
                let protocols: Vec<ProtocolResult> = protocol_results
                    .iter()
                    .filter(|(c, _)| *c == chain_id)
                    .map(|(_, p)| p.clone())
                    .collect();

                BlockchainResult {
                    chain_name: chain_display_name(&chain_id),
                    chain_id,
                    pool_count: protocols.iter().map(|p| p.pool_count).sum(),
                    total_tvl: protocols.iter().map(|p| p.total_tvl).sum(),
                    best_apr: protocols
                        .iter()
                        .map(|p| p.best_apr)
                        .fold(0.0_f64, f64::max),
                    protocols,
                }
            })
            .collect();

        // Результат детерминирован независимо от порядка завершения задач
        blockchains.sort_by(|a, b| b.total_tvl.total_cmp(&a.total_tvl));

        let total_pools = blockchains.iter().map(|b| b.pool_count).sum();

        Ok(TokenSearchResult {
            token: normalized,
            total_pools,
            blockchains,
        })
    }
}

impl Default for TokenSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
