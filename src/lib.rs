//! Poolscout - Cross-chain DEX liquidity pool aggregator
//! Built with Domain-Driven Design principles

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::PoolService;
pub use domain::pools::{filter_pools, PoolFilter, SortBy};
pub use domain::search::{TokenSearchEngine, TokenSearchResult};
pub use domain::tokens::TokenResolver;
pub use infrastructure::sources::{BluefinSource, HyperionSource, PoolSource};
pub use shared::types::{BotConfig, MarketStats, PoolRecord};
