//! Токены: реестр, резолвер символов, классификация

pub mod registry;
pub mod resolver;

pub use resolver::{TokenResolver, UNKNOWN_SYMBOL};

/// Категория токена по его символу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Stablecoin,
    Wrapped,
    Staked,
    Native,
    Dex,
    Unknown,
}

const STABLECOINS: [&str; 8] = [
    "USDC", "USDT", "DAI", "ceUSDC", "ceUSDT", "whUSDC", "whUSDT", "USD1",
];
const WRAPPED: [&str; 6] = ["WETH", "WBTC", "ceWETH", "ceWBTC", "whWETH", "xBTC"];
const STAKED: [&str; 4] = ["amAPT", "stAPT", "tAPT", "kAPT"];
const DEX_TOKENS: [&str; 3] = ["CAKE", "MOD", "THL"];

/// Определить категорию токена по разрешенному символу
pub fn token_category(symbol: &str) -> TokenCategory {
    if STABLECOINS.contains(&symbol) {
        TokenCategory::Stablecoin
    } else if WRAPPED.contains(&symbol) {
        TokenCategory::Wrapped
    } else if STAKED.contains(&symbol) {
        TokenCategory::Staked
    } else if symbol == "APT" {
        TokenCategory::Native
    } else if DEX_TOKENS.contains(&symbol) {
        TokenCategory::Dex
    } else {
        TokenCategory::Unknown
    }
}

/// Пара из двух стейблкоинов?
pub fn is_stablecoin_pair(symbol_x: &str, symbol_y: &str) -> bool {
    token_category(symbol_x) == TokenCategory::Stablecoin
        && token_category(symbol_y) == TokenCategory::Stablecoin
}
