//! Пулы: фильтрация, fee tiers, рыночная статистика

pub mod fee_tier;
pub mod filter;
pub mod stats;

pub use filter::{filter_pools, PoolFilter, SortBy};
pub use stats::compute_market_stats;
