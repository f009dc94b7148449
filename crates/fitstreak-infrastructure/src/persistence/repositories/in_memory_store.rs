use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use fitstreak_domain::check_in::CheckInStore;
use fitstreak_domain::shared::DomainError;

/// Process-local store, used for `--in-memory` runs and tests
#[derive(Default)]
pub struct InMemoryCheckInStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryCheckInStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CheckInStore for InMemoryCheckInStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, DomainError> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(keys
            .iter()
            .filter(|key| entries.remove(key.as_str()).is_some())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_basic_operations() {
        let store = InMemoryCheckInStore::new();
        assert!(store.is_empty().await);

        store.set("@Checkin_1_workout_2024-01-01", "1").await.unwrap();
        store.set("@Other", "x").await.unwrap();

        assert_eq!(
            store.get("@Checkin_1_workout_2024-01-01").await.unwrap(),
            Some("1".to_string())
        );
        assert_eq!(
            store.keys_with_prefix("@Checkin_").await.unwrap(),
            vec!["@Checkin_1_workout_2024-01-01".to_string()]
        );

        let keys = vec!["@Other".to_string(), "@Missing".to_string()];
        assert_eq!(
            store.multi_get(&keys).await.unwrap(),
            vec![
                ("@Other".to_string(), Some("x".to_string())),
                ("@Missing".to_string(), None)
            ]
        );
        assert_eq!(store.multi_remove(&keys).await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
    }
}
