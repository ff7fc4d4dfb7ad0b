//! Common types used across the application

use serde::{Deserialize, Serialize};

use crate::domain::pools::fee_tier::format_fee_tier;

/// Каноническая модель пула ликвидности
///
/// Каждый адаптер обязан привести сырой ответ своего API к этой форме;
/// все слои выше работают только с ней.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub protocol: String,
    pub pool_address: String,
    pub token_x_symbol: String,
    pub token_y_symbol: String,
    pub tvl_usd: f64,
    pub volume_24h: f64,
    pub fees_24h: f64,
    /// Fee rate из API (100, 500, 2500, 10000); fee_rate / 10000 = процент
    pub fee_rate: u32,
    pub apr_fees: f64,
    pub apr_farming: f64,
    /// Инвариант: total_apr == apr_fees + apr_farming
    pub total_apr: f64,
    /// Производное: apr_farming > 0
    pub has_farm: bool,
}

impl PoolRecord {
    /// Название пула в формате "TOKEN1-TOKEN2"
    pub fn pool_name(&self) -> String {
        format!("{}-{}", self.token_x_symbol, self.token_y_symbol)
    }

    /// Fee tier в читаемом виде ("0.25%" или "N/A")
    pub fn fee_tier_display(&self) -> String {
        format_fee_tier(self.fee_rate)
    }
}

/// Статистика рынка по списку пулов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub total_value_locked: f64,
    pub volume_24h: f64,
    pub fees_24h: f64,
    /// Capital Efficiency = Volume 24H / TVL
    pub capital_efficiency: f64,
    pub active_pools: usize,
}

/// Настройки одного источника пулов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub api_url: String,
    pub min_tvl_usd: f64,
    pub min_volume_24h: f64,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

/// Конфигурация бота (Config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_hyperion")]
    pub hyperion: SourceSettings,
    #[serde(default = "BotConfig::default_bluefin")]
    pub bluefin: SourceSettings,
}

impl BotConfig {
    fn default_hyperion() -> SourceSettings {
        SourceSettings {
            api_url: "https://hyperfluid-api.alcove.pro/v1/graphql".to_string(),
            min_tvl_usd: 100_000.0,
            min_volume_24h: 50_000.0,
            cache_ttl_secs: 60,
            request_timeout_secs: 30,
        }
    }

    fn default_bluefin() -> SourceSettings {
        SourceSettings {
            api_url: "https://api.sui-prod.bluefin.io/v1/exchange/pools".to_string(),
            // У Bluefin свои пороги активности: достаточно ненулевых метрик
            min_tvl_usd: 1.0,
            min_volume_24h: 1.0,
            cache_ttl_secs: 60,
            request_timeout_secs: 30,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            hyperion: Self::default_hyperion(),
            bluefin: Self::default_bluefin(),
        }
    }
}
