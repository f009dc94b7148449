use chrono::NaiveDate;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::repository::CheckInStore;
use super::task_completion::TaskCompletionCache;
use super::value_objects::{
    CheckInFlag, CheckInKey, CheckInRecord, TaskKind, CHECK_IN_KEY_PREFIX, COMPLETED_VALUE,
};
use crate::shared::{DomainError, UserId};

/// Records daily completions and answers "is this task done today".
///
/// Storage failures on the read/record paths never surface as errors: they
/// are logged and reported as "not completed".
pub struct CheckInRecorder {
    store: Arc<dyn CheckInStore>,
}

impl CheckInRecorder {
    pub fn new(store: Arc<dyn CheckInStore>) -> Self {
        Self { store }
    }

    /// Mark `flag` done for `today`. Returns `true` only for the call that
    /// actually wrote the flag.
    pub async fn record_check_in(
        &self,
        user_id: UserId,
        flag: CheckInFlag,
        today: NaiveDate,
    ) -> bool {
        let key = CheckInKey::new(user_id, flag, today).to_string();

        match self.store.get(&key).await {
            Ok(Some(value)) if value == COMPLETED_VALUE => {
                info!("[checkin] already completed key={}", key);
                return false;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("[checkin] read failed key={} err={}", key, e);
                return false;
            }
        }

        match self.store.set(&key, COMPLETED_VALUE).await {
            Ok(()) => {
                info!("[checkin] recorded key={}", key);
                true
            }
            Err(e) => {
                warn!("[checkin] write failed key={} err={}", key, e);
                false
            }
        }
    }

    /// Whether every flag `task` requires is set for `day`.
    pub async fn is_task_complete(
        &self,
        user_id: UserId,
        task: TaskKind,
        day: NaiveDate,
    ) -> bool {
        let keys: Vec<String> = task
            .required_flags()
            .iter()
            .map(|flag| CheckInKey::new(user_id, *flag, day).to_string())
            .collect();

        match self.store.multi_get(&keys).await {
            Ok(values) => {
                let values: HashMap<String, Option<String>> = values.into_iter().collect();
                all_completed(&keys, &values)
            }
            Err(e) => {
                warn!(
                    "[checkin] completion read failed user_id={} task={} err={}",
                    user_id, task, e
                );
                false
            }
        }
    }

    /// Promote `comment` + `post_article` into the combined credit.
    ///
    /// Returns `true` only when both sub-flags exist and the combined flag was
    /// newly written by this call.
    pub async fn complete_combined_task(&self, user_id: UserId, day: NaiveDate) -> bool {
        let sub_keys: Vec<String> = [CheckInFlag::Comment, CheckInFlag::PostArticle]
            .iter()
            .map(|flag| CheckInKey::new(user_id, *flag, day).to_string())
            .collect();

        let values: HashMap<String, Option<String>> = match self.store.multi_get(&sub_keys).await {
            Ok(values) => values.into_iter().collect(),
            Err(e) => {
                warn!(
                    "[checkin] combined task read failed user_id={} err={}",
                    user_id, e
                );
                return false;
            }
        };

        if !all_completed(&sub_keys, &values) {
            info!(
                "[checkin] combined task not ready user_id={} day={}",
                user_id, day
            );
            return false;
        }

        self.record_check_in(user_id, CheckInFlag::CommentAndPost, day)
            .await
    }

    /// Completion state of every task for `day`, read in one batch.
    pub async fn load_task_board(&self, user_id: UserId, day: NaiveDate) -> TaskCompletionCache {
        let keys: Vec<String> = CheckInFlag::ALL
            .iter()
            .map(|flag| CheckInKey::new(user_id, *flag, day).to_string())
            .collect();

        let values = match self.store.multi_get(&keys).await {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    "[checkin] task board read failed user_id={} err={}",
                    user_id, e
                );
                return TaskCompletionCache::empty();
            }
        };

        let done: HashSet<CheckInFlag> = CheckInFlag::ALL
            .iter()
            .zip(values)
            .map(|(flag, (_, value))| {
                CheckInRecord::from_stored(CheckInKey::new(user_id, *flag, day), value.as_deref())
            })
            .filter(|record| record.completed)
            .map(|record| record.flag)
            .collect();

        TaskKind::ALL
            .into_iter()
            .map(|task| {
                let complete = task.required_flags().iter().all(|flag| done.contains(flag));
                (task, complete)
            })
            .collect()
    }

    /// Remove every check-in key dated before `cutoff`.
    pub async fn prune_before(&self, cutoff: NaiveDate) -> Result<usize, DomainError> {
        let keys = self.store.keys_with_prefix(CHECK_IN_KEY_PREFIX).await?;

        let mut expired = Vec::new();
        for key in keys {
            match CheckInKey::parse(&key) {
                Ok(parsed) if parsed.date < cutoff => expired.push(key),
                Ok(_) => {}
                Err(e) => warn!("[checkin] skip unparseable key={} err={}", key, e),
            }
        }

        if expired.is_empty() {
            return Ok(0);
        }

        let removed = self.store.multi_remove(&expired).await?;
        info!(
            "[checkin] pruned keys before={} removed={}",
            cutoff, removed
        );
        Ok(removed)
    }
}

fn all_completed(keys: &[String], values: &HashMap<String, Option<String>>) -> bool {
    keys.iter().all(|key| {
        values
            .get(key)
            .and_then(|value| value.as_deref())
            .is_some_and(|value| value == COMPLETED_VALUE)
    })
}
