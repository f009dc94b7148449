use async_trait::async_trait;

use crate::shared::DomainError;

/// Device-local key-value store holding the daily completion flags.
///
/// Writes are last-write-wins and nothing expires on its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Upsert a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Batch read. Results come back in request order, absent keys as `None`.
    async fn multi_get(&self, keys: &[String])
        -> Result<Vec<(String, Option<String>)>, DomainError>;

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError>;

    /// Remove keys, returning how many existed.
    async fn multi_remove(&self, keys: &[String]) -> Result<usize, DomainError>;
}
