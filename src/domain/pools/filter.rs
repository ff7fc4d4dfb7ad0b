//! Фильтрация и сортировка пулов
//!
//! Детерминированный конвейер, не мутирует входные данные.

use std::str::FromStr;

use crate::shared::types::PoolRecord;

/// Критерий сортировки пулов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Tvl,
    Volume,
    Apr,
    Fees,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tvl" => Ok(SortBy::Tvl),
            "volume" => Ok(SortBy::Volume),
            "apr" => Ok(SortBy::Apr),
            "fees" => Ok(SortBy::Fees),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl SortBy {
    fn key(&self, pool: &PoolRecord) -> f64 {
        match self {
            SortBy::Tvl => pool.tvl_usd,
            SortBy::Volume => pool.volume_24h,
            SortBy::Apr => pool.total_apr,
            SortBy::Fees => pool.fees_24h,
        }
    }
}

/// Параметры фильтрации пулов
#[derive(Debug, Clone, Default)]
pub struct PoolFilter {
    pub min_tvl: f64,
    pub min_volume: Option<f64>,
    pub fee_tiers: Option<Vec<u32>>,
    pub has_farm: Option<bool>,
    pub sort_by: SortBy,
    pub limit: Option<usize>,
}

/// Отфильтровать и отсортировать пулы.
///
/// Шаги: TVL floor -> volume floor -> нулевой TVL -> fee tiers ->
/// farming -> сортировка по убыванию (стабильная) -> лимит.
pub fn filter_pools(pools: &[PoolRecord], filter: &PoolFilter) -> Vec<PoolRecord> {
    let mut filtered: Vec<PoolRecord> = pools
        .iter()
        .filter(|p| p.tvl_usd >= filter.min_tvl)
        .filter(|p| match filter.min_volume {
            Some(min_volume) => p.volume_24h >= min_volume,
            None => true,
        })
        .filter(|p| p.tvl_usd > 0.0)
        .filter(|p| match &filter.fee_tiers {
            Some(tiers) => tiers.contains(&p.fee_rate),
            None => true,
        })
        .filter(|p| match filter.has_farm {
            Some(has_farm) => p.has_farm == has_farm,
            None => true,
        })
        .cloned()
        .collect();

    // sort_by стабильна: при равных ключах сохраняется исходный порядок
    let sort_by = filter.sort_by;
    filtered.sort_by(|a, b| sort_by.key(b).total_cmp(&sort_by.key(a)));

    if let Some(limit) = filter.limit {
        filtered.truncate(limit);
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(address: &str, tvl: f64, volume: f64, apr: f64, fee_rate: u32, farm: bool) -> PoolRecord {
        let apr_farming = if farm { apr / 2.0 } else { 0.0 };
        PoolRecord {
            protocol: "hyperion".to_string(),
            pool_address: address.to_string(),
            token_x_symbol: "APT".to_string(),
            token_y_symbol: "USDC".to_string(),
            tvl_usd: tvl,
            volume_24h: volume,
            fees_24h: volume * 0.003,
            fee_rate,
            apr_fees: apr - apr_farming,
            apr_farming,
            total_apr: apr,
            has_farm: farm,
        }
    }

    #[test]
    fn test_tvl_floor() {
        let pools = vec![
            pool("a", 200_000.0, 60_000.0, 10.0, 2500, false),
            pool("b", 50_000.0, 60_000.0, 10.0, 2500, false),
        ];
        let filter = PoolFilter {
            min_tvl: 100_000.0,
            ..Default::default()
        };
        let result = filter_pools(&pools, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].pool_address, "a");
    }

    #[test]
    fn test_sorted_descending_by_tvl() {
        let pools = vec![
            pool("a", 100.0, 1.0, 1.0, 500, false),
            pool("b", 300.0, 1.0, 1.0, 500, false),
            pool("c", 200.0, 1.0, 1.0, 500, false),
        ];
        let result = filter_pools(&pools, &PoolFilter::default());
        let tvls: Vec<f64> = result.iter().map(|p| p.tvl_usd).collect();
        assert_eq!(tvls, vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let pools = vec![
            pool("a", 100.0, 1.0, 1.0, 500, false),
            pool("b", 300.0, 1.0, 5.0, 2500, true),
            pool("c", 200.0, 1.0, 3.0, 500, false),
        ];
        let filter = PoolFilter {
            sort_by: SortBy::Apr,
            ..Default::default()
        };
        let once = filter_pools(&pools, &filter);
        let twice = filter_pools(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stable_sort_preserves_order_on_ties() {
        let pools = vec![
            pool("first", 100.0, 1.0, 1.0, 500, false),
            pool("second", 100.0, 1.0, 1.0, 500, false),
        ];
        let result = filter_pools(&pools, &PoolFilter::default());
        assert_eq!(result[0].pool_address, "first");
        assert_eq!(result[1].pool_address, "second");
    }

    #[test]
    fn test_fee_tier_and_farm_filters() {
        let pools = vec![
            pool("a", 100.0, 1.0, 1.0, 500, true),
            pool("b", 100.0, 1.0, 1.0, 2500, true),
            pool("c", 100.0, 1.0, 1.0, 2500, false),
        ];
        let filter = PoolFilter {
            fee_tiers: Some(vec![2500]),
            has_farm: Some(true),
            ..Default::default()
        };
        let result = filter_pools(&pools, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].pool_address, "b");
    }

    #[test]
    fn test_volume_floor_and_limit() {
        let pools = vec![
            pool("a", 300.0, 10.0, 1.0, 500, false),
            pool("b", 200.0, 100.0, 1.0, 500, false),
            pool("c", 100.0, 100.0, 1.0, 500, false),
        ];
        let filter = PoolFilter {
            min_volume: Some(50.0),
            limit: Some(1),
            ..Default::default()
        };
        let result = filter_pools(&pools, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].pool_address, "b");
    }

    #[test]
    fn test_input_not_mutated() {
        let pools = vec![
            pool("a", 100.0, 1.0, 1.0, 500, false),
            pool("b", 300.0, 1.0, 1.0, 500, false),
        ];
        let snapshot = pools.clone();
        let _ = filter_pools(&pools, &PoolFilter::default());
        assert_eq!(pools, snapshot);
    }

    #[test]
    fn test_sort_by_from_str() {
        assert_eq!("tvl".parse::<SortBy>().unwrap(), SortBy::Tvl);
        assert_eq!("APR".parse::<SortBy>().unwrap(), SortBy::Apr);
        assert!("liquidity".parse::<SortBy>().is_err());
    }
}
