use async_trait::async_trait;

use crate::shared::errors::SourceError;
use crate::shared::types::PoolRecord;

/// Единый интерфейс источника пулов для (блокчейн, протокол)
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// Идентификатор протокола ("hyperion", "bluefin")
    fn protocol_id(&self) -> &str;

    /// Идентификатор блокчейна ("aptos", "sui")
    fn chain_id(&self) -> &str;

    /// Отображаемое имя протокола
    fn display_name(&self) -> &str;

    /// Получить обогащенный список пулов.
    ///
    /// Возвращает `SourceError` только если upstream недоступен
    /// и нет ни свежего, ни устаревшего кэша.
    async fn fetch_pools(&self, force_refresh: bool) -> Result<Vec<PoolRecord>, SourceError>;
}
