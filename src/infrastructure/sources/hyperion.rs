//! Адаптер Hyperion (Aptos, GraphQL API)
//!
//! Цепочка fallback задокументирована: официальный GraphQL API ->
//! устаревший кэш -> агрегат DefiLlama -> синтетические демо-пулы.
//! Демо-данные всегда отличимы по префиксу адреса `demo_pool_`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::cache::PoolCache;
use super::payload::{get_f64, get_str};
use super::traits::PoolSource;
use crate::domain::tokens::TokenResolver;
use crate::shared::errors::SourceError;
use crate::shared::types::{PoolRecord, SourceSettings};

pub const PROTOCOL_NAME: &str = "hyperion";
pub const CHAIN_ID: &str = "aptos";

/// Префикс адресов синтетических демо-пулов
pub const DEMO_POOL_PREFIX: &str = "demo_pool_";

const DEFILLAMA_URL: &str = "https://api.llama.fi/protocol/hyperion";

const POOLS_QUERY: &str = r#"
query GetAllPools {
  api {
    getPoolStat {
      id
      tvlUSD
      dailyVolumeUSD
      feesUSD
      feeAPR
      farmAPR
      pool {
        token1
        token2
        feeRate
        currentTick
        sqrtPrice
        activeLpAmount
      }
    }
  }
}
"#;

/// Конверт ответа GraphQL
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    errors: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    api: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(rename = "getPoolStat", default)]
    get_pool_stat: Vec<Value>,
}

pub struct HyperionSource {
    settings: SourceSettings,
    http_client: Client,
    resolver: Arc<TokenResolver>,
    cache: PoolCache,
}

impl HyperionSource {
    pub fn new(settings: SourceSettings, resolver: Arc<TokenResolver>) -> Self {
        let cache = PoolCache::new(Duration::from_secs(settings.cache_ttl_secs));
        Self {
            settings,
            http_client: Client::new(),
            resolver,
            cache,
        }
    }

    /// Обновить данные из основного API
    async fn refresh(&self) -> Result<Vec<PoolRecord>, SourceError> {
        let raw_pools = self.fetch_from_graphql().await?;
        let total = raw_pools.len();

        let enriched = self.enrich_active(raw_pools);
        info!(
            "Filtered {} active pools from {} total (min TVL: ${}, min Volume 24H: ${})",
            enriched.len(),
            total,
            self.settings.min_tvl_usd,
            self.settings.min_volume_24h
        );
        Ok(enriched)
    }

    /// Отбросить неактивные пулы и привести остальные к канонической форме.
    /// Некорректные отдельные записи пропускаются, батч не прерывается.
    fn enrich_active(&self, raw_pools: Vec<Value>) -> Vec<PoolRecord> {
        raw_pools
            .iter()
            .filter(|p| {
                get_f64(p, &["tvlUSD"]) >= self.settings.min_tvl_usd
                    && get_f64(p, &["dailyVolumeUSD"]) >= self.settings.min_volume_24h
            })
            .filter_map(|p| self.map_record(p))
            .collect()
    }

    async fn fetch_from_graphql(&self) -> Result<Vec<Value>, SourceError> {
        let response = self
            .http_client
            .post(&self.settings.api_url)
            .timeout(Duration::from_secs(self.settings.request_timeout_secs))
            .json(&serde_json::json!({ "query": POOLS_QUERY }))
            .send()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(
                "Hyperion API request failed with status {}: {}",
                status, text
            );
            return Err(SourceError::BadStatus(status.as_u16()));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        // Ошибки GraphQL приходят внутри HTTP 200
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let msg = serde_json::to_string(&errors).unwrap_or_default();
                error!("GraphQL errors in Hyperion API: {}", msg);
                return Err(SourceError::GraphQl(msg));
            }
        }

        let pools_stat = body
            .data
            .and_then(|d| d.api)
            .map(|api| api.get_pool_stat)
            .unwrap_or_default();

        if pools_stat.is_empty() {
            warn!("No pools found in Hyperion API response");
        }

        Ok(pools_stat)
    }

    /// Привести одну сырую запись к `PoolRecord`
    fn map_record(&self, pool_stat: &Value) -> Option<PoolRecord> {
        let pool_address = get_str(pool_stat, &["id"])?.to_string();
        let pool_info = pool_stat.get("pool")?;

        let token_x_address = get_str(pool_info, &["token1"]).unwrap_or_default();
        let token_y_address = get_str(pool_info, &["token2"]).unwrap_or_default();

        let token_x_symbol = self.resolver.resolve(token_x_address);
        let token_y_symbol = self.resolver.resolve(token_y_address);

        let apr_fees = get_f64(pool_stat, &["feeAPR"]);
        let apr_farming = get_f64(pool_stat, &["farmAPR"]);

        Some(PoolRecord {
            protocol: PROTOCOL_NAME.to_string(),
            pool_address,
            token_x_symbol,
            token_y_symbol,
            tvl_usd: get_f64(pool_stat, &["tvlUSD"]),
            volume_24h: get_f64(pool_stat, &["dailyVolumeUSD"]),
            fees_24h: get_f64(pool_stat, &["feesUSD"]),
            fee_rate: get_f64(pool_info, &["feeRate"]) as u32,
            apr_fees,
            apr_farming,
            total_apr: apr_fees + apr_farming,
            has_farm: apr_farming > 0.0,
        })
    }

    /// Fallback: агрегат TVL протокола из DefiLlama
    async fn fetch_from_defillama(&self) -> Result<Vec<PoolRecord>, SourceError> {
        info!("Fetching data from DefiLlama as fallback");

        let response = self
            .http_client
            .get(DEFILLAMA_URL)
            .timeout(Duration::from_secs(self.settings.request_timeout_secs))
            .send()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::BadStatus(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::UpstreamUnavailable(e.to_string()))?;

        let latest_tvl = body
            .get("tvl")
            .and_then(|tvl| tvl.as_array())
            .and_then(|points| points.last())
            .map(|point| get_f64(point, &["totalLiquidityUSD"]))
            .unwrap_or(0.0);

        if latest_tvl <= 0.0 {
            warn!("No TVL data in DefiLlama response, using demo pools");
            return Ok(Self::demo_pools());
        }

        info!("DefiLlama TVL: ${:.0}", latest_tvl);
        Ok(Self::demo_pools_from_tvl(latest_tvl))
    }

    /// Синтетические пулы: известный TVL распределяется по популярным парам
    fn demo_pools_from_tvl(total_tvl: f64) -> Vec<PoolRecord> {
        let popular_pairs: [(&str, &str, f64); 5] = [
            ("APT", "USDC", 0.4),
            ("APT", "USDT", 0.3),
            ("USDC", "USDT", 0.15),
            ("APT", "WBTC", 0.1),
            ("APT", "WETH", 0.05),
        ];

        let base_apr = 15.0;

        popular_pairs
            .iter()
            .enumerate()
            .map(|(i, (token_x, token_y, tvl_share))| {
                let tvl_usd = total_tvl * tvl_share;
                let volume_24h = tvl_usd * 0.1;
                let fees_24h = volume_24h * 0.003;

                let base = base_apr * (1.0 + i as f64 * 0.1);
                let apr_fees = base * 0.7;
                let apr_farming = base * 0.3;
                // total_apr всегда вычисляется, не берется из источника
                let total_apr = apr_fees + apr_farming;

                PoolRecord {
                    protocol: PROTOCOL_NAME.to_string(),
                    pool_address: format!("{}{}_{}_{}", DEMO_POOL_PREFIX, i, token_x, token_y),
                    token_x_symbol: token_x.to_string(),
                    token_y_symbol: token_y.to_string(),
                    tvl_usd,
                    volume_24h,
                    fees_24h,
                    fee_rate: 2500,
                    apr_fees,
                    apr_farming,
                    total_apr,
                    has_farm: true,
                }
            })
            .collect()
    }

    /// Демо-пулы на случай полной недоступности всех источников
    fn demo_pools() -> Vec<PoolRecord> {
        info!("Creating demo pools as last resort fallback");

        let rows: [(&str, &str, f64, f64, f64, f64, f64); 4] = [
            ("APT", "USDC", 1_000_000.0, 100_000.0, 5_000.0, 12.5, 5.5),
            ("APT", "USDT", 750_000.0, 75_000.0, 3_750.0, 15.0, 6.0),
            ("USDC", "USDT", 500_000.0, 50_000.0, 2_500.0, 8.0, 2.0),
            ("APT", "WBTC", 250_000.0, 25_000.0, 1_250.0, 20.0, 8.0),
        ];

        rows.iter()
            .enumerate()
            .map(
                |(i, (token_x, token_y, tvl, volume, fees, apr_fees, apr_farming))| PoolRecord {
                    protocol: PROTOCOL_NAME.to_string(),
                    pool_address: format!("{}{}_{}_{}", DEMO_POOL_PREFIX, i, token_x, token_y),
                    token_x_symbol: token_x.to_string(),
                    token_y_symbol: token_y.to_string(),
                    tvl_usd: *tvl,
                    volume_24h: *volume,
                    fees_24h: *fees,
                    fee_rate: 2500,
                    apr_fees: *apr_fees,
                    apr_farming: *apr_farming,
                    total_apr: apr_fees + apr_farming,
                    has_farm: *apr_farming > 0.0,
                },
            )
            .collect()
    }
}

#[async_trait]
impl PoolSource for HyperionSource {
    fn protocol_id(&self) -> &str {
        PROTOCOL_NAME
    }

    fn chain_id(&self) -> &str {
        CHAIN_ID
    }

    fn display_name(&self) -> &str {
        "Hyperion"
    }

    async fn fetch_pools(&self, force_refresh: bool) -> Result<Vec<PoolRecord>, SourceError> {
        match self.cache.fetch_with(force_refresh, || self.refresh()).await {
            Ok(pools) => Ok(pools),
            Err(err) => {
                // Кэша нет совсем - задействуем резервную цепочку
                warn!(
                    "Failed to fetch from Hyperion API: {}, trying DefiLlama fallback",
                    err
                );
                match self.fetch_from_defillama().await {
                    Ok(pools) => Ok(pools),
                    Err(fallback_err) => {
                        error!("Failed to fetch from DefiLlama: {}", fallback_err);
                        Ok(Self::demo_pools())
                    }
                }
            }
        }
    }
}
