use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fitstreak_domain::check_in::{CheckInRecorder, CheckInStore};
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{StreakProfileSource, UserStreakProfile};
use fitstreak_infrastructure::persistence::repositories::InMemoryCheckInStore;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn memory_recorder() -> (Arc<InMemoryCheckInStore>, Arc<CheckInRecorder>) {
    let store = Arc::new(InMemoryCheckInStore::new());
    let recorder = Arc::new(CheckInRecorder::new(store.clone()));
    (store, recorder)
}

/// Canned remote profile service
pub struct MockProfileSource {
    pub current_streak: u32,
    pub last_check_in_date: Option<NaiveDate>,
    pub history: Vec<NaiveDate>,
    pub fail: bool,
    submits: AtomicUsize,
}

impl MockProfileSource {
    pub fn new(current_streak: u32, last_check_in_date: Option<NaiveDate>) -> Self {
        Self {
            current_streak,
            last_check_in_date,
            history: Vec::new(),
            fail: false,
            submits: AtomicUsize::new(0),
        }
    }

    pub fn with_history(mut self, history: Vec<NaiveDate>) -> Self {
        self.history = history;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, None)
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::ExternalService("profile service down".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StreakProfileSource for MockProfileSource {
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserStreakProfile, DomainError> {
        self.check()?;
        Ok(UserStreakProfile::new(
            user_id,
            self.current_streak,
            self.last_check_in_date,
        ))
    }

    async fn fetch_check_in_history(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        self.check()?;
        Ok(self.history.clone())
    }

    async fn submit_check_in(&self, _user_id: UserId) -> Result<(), DomainError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.check()
    }
}

/// Store whose every call fails
pub struct BrokenStore;

#[async_trait]
impl CheckInStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Repository("disk unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Repository("disk unavailable".to_string()))
    }

    async fn multi_get(
        &self,
        _keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, DomainError> {
        Err(DomainError::Repository("disk unavailable".to_string()))
    }

    async fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, DomainError> {
        Err(DomainError::Repository("disk unavailable".to_string()))
    }

    async fn multi_remove(&self, _keys: &[String]) -> Result<usize, DomainError> {
        Err(DomainError::Repository("disk unavailable".to_string()))
    }
}
