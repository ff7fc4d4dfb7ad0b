//! Кросс-чейн поиск токенов

pub mod engine;

pub use engine::{BlockchainResult, ProtocolResult, TokenSearchEngine, TokenSearchResult};
