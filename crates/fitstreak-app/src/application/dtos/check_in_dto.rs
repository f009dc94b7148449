use serde::{Deserialize, Serialize};

use fitstreak_domain::check_in::{format_calendar_date, TaskCompletionCache};
use fitstreak_domain::shared::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordCheckInResultDto {
    pub user_id: i64,
    pub flag: String,
    pub date: String, // YYYY-MM-DD
    pub newly_recorded: bool,
    /// `None` when no profile service is configured or nothing was recorded
    pub remote_synced: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedTaskResultDto {
    pub user_id: i64,
    pub date: String,
    pub newly_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PruneResultDto {
    pub before: String,
    pub removed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatusDto {
    pub task: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskBoardDto {
    pub user_id: i64,
    pub date: String,
    pub tasks: Vec<TaskStatusDto>,
    pub completed_count: usize,
    pub all_complete: bool,
}

impl TaskBoardDto {
    pub fn from_cache(user_id: UserId, date: chrono::NaiveDate, cache: &TaskCompletionCache) -> Self {
        Self {
            user_id: user_id.value(),
            date: format_calendar_date(date),
            tasks: cache
                .iter()
                .map(|(task, completed)| TaskStatusDto {
                    task: task.as_str().to_string(),
                    completed,
                })
                .collect(),
            completed_count: cache.completed_count(),
            all_complete: cache.all_complete(),
        }
    }
}
