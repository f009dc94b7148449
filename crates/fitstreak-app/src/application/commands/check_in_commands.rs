use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::command_handler::Command;
use fitstreak_domain::check_in::CheckInFlag;
use fitstreak_domain::shared::UserId;

/// Record one completion flag. `date` defaults to the local calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCheckInCommand {
    pub user_id: UserId,
    pub flag: CheckInFlag,
    pub date: Option<NaiveDate>,
}

impl Command for RecordCheckInCommand {}

/// Promote `comment` + `post_article` into the combined credit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteCombinedTaskCommand {
    pub user_id: UserId,
    pub date: Option<NaiveDate>,
}

impl Command for CompleteCombinedTaskCommand {}

/// Remove every stored check-in dated strictly before `before`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneCheckInsCommand {
    pub before: NaiveDate,
}

impl Command for PruneCheckInsCommand {}
