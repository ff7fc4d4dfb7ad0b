pub mod services;

pub use services::PoolService;
