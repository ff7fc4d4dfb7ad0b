//! Источники данных о пулах (по одному адаптеру на протокол)

pub mod bluefin;
pub mod cache;
pub mod hyperion;
mod payload;
pub mod traits;

pub use bluefin::BluefinSource;
pub use cache::PoolCache;
pub use hyperion::HyperionSource;
pub use traits::PoolSource;
