pub mod pools;
pub mod search;
pub mod tokens;
