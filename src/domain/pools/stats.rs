//! Статистика рынка по обогащенному списку пулов

use crate::shared::types::{MarketStats, PoolRecord};

/// Вычислить статистику рынка
pub fn compute_market_stats(pools: &[PoolRecord]) -> MarketStats {
    if pools.is_empty() {
        return MarketStats {
            total_value_locked: 0.0,
            volume_24h: 0.0,
            fees_24h: 0.0,
            capital_efficiency: 0.0,
            active_pools: 0,
        };
    }

    let total_tvl: f64 = pools.iter().map(|p| p.tvl_usd).sum();
    let volume_24h: f64 = pools.iter().map(|p| p.volume_24h).sum();
    let fees_24h: f64 = pools.iter().map(|p| p.fees_24h).sum();

    let capital_efficiency = if total_tvl > 0.0 {
        volume_24h / total_tvl
    } else {
        0.0
    };

    MarketStats {
        total_value_locked: total_tvl,
        volume_24h,
        fees_24h,
        capital_efficiency,
        active_pools: pools.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = compute_market_stats(&[]);
        assert_eq!(stats.total_value_locked, 0.0);
        assert_eq!(stats.capital_efficiency, 0.0);
        assert_eq!(stats.active_pools, 0);
    }

    #[test]
    fn test_stats_aggregation() {
        let pool = |tvl: f64, volume: f64| PoolRecord {
            protocol: "hyperion".to_string(),
            pool_address: "p".to_string(),
            token_x_symbol: "APT".to_string(),
            token_y_symbol: "USDC".to_string(),
            tvl_usd: tvl,
            volume_24h: volume,
            fees_24h: 10.0,
            fee_rate: 2500,
            apr_fees: 5.0,
            apr_farming: 0.0,
            total_apr: 5.0,
            has_farm: false,
        };

        let stats = compute_market_stats(&[pool(1000.0, 100.0), pool(3000.0, 300.0)]);
        assert_eq!(stats.total_value_locked, 4000.0);
        assert_eq!(stats.volume_24h, 400.0);
        assert_eq!(stats.fees_24h, 20.0);
        assert_eq!(stats.capital_efficiency, 0.1);
        assert_eq!(stats.active_pools, 2);
    }
}
