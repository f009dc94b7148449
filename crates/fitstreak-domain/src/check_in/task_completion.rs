use serde::Serialize;
use std::collections::BTreeMap;

use super::value_objects::TaskKind;

/// Per-day completion state of every task kind, filled by one batch read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCompletionCache {
    tasks: BTreeMap<TaskKind, bool>,
}

impl TaskCompletionCache {
    /// Every task incomplete
    pub fn empty() -> Self {
        Self {
            tasks: TaskKind::ALL.into_iter().map(|kind| (kind, false)).collect(),
        }
    }

    pub fn is_complete(&self, task: TaskKind) -> bool {
        self.tasks.get(&task).copied().unwrap_or(false)
    }

    pub fn mark_complete(&mut self, task: TaskKind) {
        self.tasks.insert(task, true);
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.values().filter(|done| **done).count()
    }

    pub fn all_complete(&self) -> bool {
        self.tasks.values().all(|done| *done)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskKind, bool)> + '_ {
        self.tasks.iter().map(|(kind, done)| (*kind, *done))
    }
}

impl Default for TaskCompletionCache {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<(TaskKind, bool)> for TaskCompletionCache {
    fn from_iter<I: IntoIterator<Item = (TaskKind, bool)>>(iter: I) -> Self {
        let mut cache = Self::empty();
        for (kind, done) in iter {
            cache.tasks.insert(kind, done);
        }
        cache
    }
}
