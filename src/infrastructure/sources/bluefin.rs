//! Адаптер Bluefin Exchange (Sui, REST API)
//!
//! Ответ Bluefin duck-типизирован: одно и то же поле приходит под
//! разными ключами (tvlUSD/tvl, volume24h/volume), токены - либо
//! готовым символом, либо on-chain адресом. Весь разбор собран
//! в `map_record`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use super::cache::PoolCache;
use super::payload::{get_f64, get_str};
use super::traits::PoolSource;
use crate::domain::tokens::{TokenResolver, UNKNOWN_SYMBOL};
use crate::shared::errors::SourceError;
use crate::shared::types::{PoolRecord, SourceSettings};

pub const PROTOCOL_NAME: &str = "bluefin";
pub const CHAIN_ID: &str = "sui";

pub struct BluefinSource {
    settings: SourceSettings,
    http_client: Client,
    resolver: Arc<TokenResolver>,
    cache: PoolCache,
}

impl BluefinSource {
    pub fn new(settings: SourceSettings, resolver: Arc<TokenResolver>) -> Self {
        let cache = PoolCache::new(Duration::from_secs(settings.cache_ttl_secs));
        Self {
            settings,
            http_client: Client::new(),
            resolver,
            cache,
        }
    }

    async fn refresh(&self) -> Result<Vec<PoolRecord>, SourceError> {
        let raw_pools = self.fetch_from_api().await?;
        let total = raw_pools.len();

        let enriched = self.enrich_active(raw_pools);
        info!(
            "Filtered {} active Bluefin pools from {} total",
            enriched.len(),
            total
        );
        Ok(enriched)
    }

    async fn fetch_from_api(&self) -> Result<Vec<Value>, SourceError> {
        let response = self
            .http_client
            .get(&self.settings.api_url)
            .timeout(Duration::from_secs(self.settings.request_timeout_secs))
            .send()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(
                "Bluefin API request failed with status {}: {}",
                status, text
            );
            return Err(SourceError::BadStatus(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        // Список приходит либо массивом, либо завернутым в data/pools
        let pools = match body {
            Value::Array(items) => items,
            Value::Object(ref obj) => obj
                .get("data")
                .or_else(|| obj.get("pools"))
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        Ok(pools)
    }

    fn enrich_active(&self, raw_pools: Vec<Value>) -> Vec<PoolRecord> {
        raw_pools
            .iter()
            .filter(|p| {
                get_f64(p, &["tvlUSD", "tvl"]) >= self.settings.min_tvl_usd
                    && get_f64(p, &["volume24h", "volume24H", "volume"])
                        >= self.settings.min_volume_24h
            })
            .filter_map(|p| self.map_record(p))
            .collect()
    }

    fn map_record(&self, pool: &Value) -> Option<PoolRecord> {
        let pool_address = get_str(pool, &["id", "address"])?.to_string();

        let token_x_symbol = self.token_symbol(pool, &["tokenA", "token0", "coinA"]);
        let token_y_symbol = self.token_symbol(pool, &["tokenB", "token1", "coinB"]);

        let apr_fees = get_f64(pool, &["feeAPR", "apr"]);
        let apr_farming = get_f64(pool, &["farmAPR"]);

        Some(PoolRecord {
            protocol: PROTOCOL_NAME.to_string(),
            pool_address,
            token_x_symbol,
            token_y_symbol,
            tvl_usd: get_f64(pool, &["tvlUSD", "tvl"]),
            volume_24h: get_f64(pool, &["volume24h", "volume24H", "volume"]),
            fees_24h: get_f64(pool, &["fees24h", "fees24H", "fees"]),
            fee_rate: Self::normalize_fee_rate(get_f64(pool, &["feeRate", "fee"])),
            apr_fees,
            apr_farming,
            total_apr: apr_fees + apr_farming,
            has_farm: apr_farming > 0.0,
        })
    }

    /// Символ токена из поля пула: вложенный объект с symbol, готовая
    /// строка-символ либо on-chain адрес через резолвер
    fn token_symbol(&self, pool: &Value, keys: &[&str]) -> String {
        for key in keys {
            match pool.get(key) {
                Some(Value::Object(obj)) => {
                    if let Some(Value::String(symbol)) = obj.get("symbol") {
                        return symbol.clone();
                    }
                }
                Some(Value::String(s)) => {
                    if s.contains("::") || s.starts_with("0x") {
                        return self.resolver.resolve(s);
                    }
                    return s.clone();
                }
                _ => {}
            }
        }
        UNKNOWN_SYMBOL.to_string()
    }

    /// Bluefin отдает fee как проценты (0.05 = 0.05%); приводим
    /// к конвенции 100/500/2500/10000
    fn normalize_fee_rate(fee: f64) -> u32 {
        if fee <= 0.0 {
            return 0;
        }
        if fee < 100.0 {
            return (fee * 10000.0) as u32;
        }
        fee as u32
    }
}

#[async_trait]
impl PoolSource for BluefinSource {
    fn protocol_id(&self) -> &str {
        PROTOCOL_NAME
    }

    fn chain_id(&self) -> &str {
        CHAIN_ID
    }

    fn display_name(&self) -> &str {
        "Bluefin Exchange"
    }

    async fn fetch_pools(&self, force_refresh: bool) -> Result<Vec<PoolRecord>, SourceError> {
        self.cache.fetch_with(force_refresh, || self.refresh()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::BotConfig;
    use serde_json::json;

    fn source() -> BluefinSource {
        BluefinSource::new(BotConfig::default().bluefin, Arc::new(TokenResolver::new()))
    }

    #[test]
    fn test_map_record_with_nested_token_objects() {
        let source = source();
        let raw = json!({
            "id": "0xpool1",
            "tokenA": {"symbol": "SUI"},
            "tokenB": {"symbol": "USDC"},
            "tvlUSD": 250_000.0,
            "volume24h": 80_000.0,
            "fees24h": 240.0,
            "feeRate": 0.05,
            "feeAPR": 9.5,
            "farmAPR": 3.0
        });

        let pools = source.enrich_active(vec![raw]);
        assert_eq!(pools.len(), 1);

        let pool = &pools[0];
        assert_eq!(pool.token_x_symbol, "SUI");
        assert_eq!(pool.token_y_symbol, "USDC");
        assert_eq!(pool.fee_rate, 500);
        assert_eq!(pool.total_apr, 12.5);
        assert!(pool.has_farm);
    }

    #[test]
    fn test_map_record_with_alternate_keys() {
        let source = source();
        let raw = json!({
            "address": "0xpool2",
            "token0": "SUI",
            "token1": "USDT",
            "tvl": 90_000.0,
            "volume": 30_000.0,
            "fees": 90.0,
            "fee": 2500,
            "apr": 7.0
        });

        let pools = source.enrich_active(vec![raw]);
        assert_eq!(pools.len(), 1);

        let pool = &pools[0];
        assert_eq!(pool.pool_address, "0xpool2");
        assert_eq!(pool.tvl_usd, 90_000.0);
        assert_eq!(pool.fee_rate, 2500);
        assert!(!pool.has_farm);
    }

    #[test]
    fn test_token_address_goes_through_resolver() {
        let source = source();
        let raw = json!({
            "id": "0xpool3",
            "coinA": "0x1::aptos_coin::AptosCoin",
            "coinB": {"symbol": "USDC"},
            "tvlUSD": 10_000.0,
            "volume24h": 5_000.0
        });

        let pools = source.enrich_active(vec![raw]);
        assert_eq!(pools[0].token_x_symbol, "APT");
    }

    #[test]
    fn test_inactive_pools_dropped() {
        let source = source();
        let raw = vec![
            json!({"id": "a", "tvlUSD": 0.0, "volume24h": 100.0, "token0": "SUI", "token1": "USDC"}),
            json!({"id": "b", "tvlUSD": 100.0, "volume24h": 0.0, "token0": "SUI", "token1": "USDC"}),
            json!({"id": "c", "tvlUSD": 100.0, "volume24h": 100.0, "token0": "SUI", "token1": "USDC"}),
        ];
        let pools = source.enrich_active(raw);
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].pool_address, "c");
    }

    #[test]
    fn test_record_without_address_dropped() {
        let source = source();
        let raw = vec![json!({"tvlUSD": 100.0, "volume24h": 100.0})];
        assert!(source.enrich_active(raw).is_empty());
    }

    #[test]
    fn test_normalize_fee_rate() {
        assert_eq!(BluefinSource::normalize_fee_rate(0.01), 100);
        assert_eq!(BluefinSource::normalize_fee_rate(1.0), 10000);
        assert_eq!(BluefinSource::normalize_fee_rate(2500.0), 2500);
        assert_eq!(BluefinSource::normalize_fee_rate(0.0), 0);
    }
}
