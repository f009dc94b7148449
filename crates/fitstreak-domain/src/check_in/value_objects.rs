use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calendar_date::{format_calendar_date, parse_calendar_date};
use crate::shared::{DomainError, UserId};

pub const CHECK_IN_KEY_PREFIX: &str = "@Checkin_";
pub const COMPLETED_VALUE: &str = "1";

/// Daily engagement actions tracked for gamification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    MealLog,
    WaterLog,
    WeightLog,
    BodyMeasurementLog,
    CommentAndPost,
    Workout,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::MealLog,
        TaskKind::WaterLog,
        TaskKind::WeightLog,
        TaskKind::BodyMeasurementLog,
        TaskKind::CommentAndPost,
        TaskKind::Workout,
    ];

    pub fn as_str(&self) -> &'static str {
        CheckInFlag::from(*self).as_str()
    }

    /// Flags that must all be present for the task to count as done
    pub fn required_flags(&self) -> &'static [CheckInFlag] {
        match self {
            TaskKind::MealLog => &[CheckInFlag::MealLog],
            TaskKind::WaterLog => &[CheckInFlag::WaterLog],
            TaskKind::WeightLog => &[CheckInFlag::WeightLog],
            TaskKind::BodyMeasurementLog => &[CheckInFlag::BodyMeasurementLog],
            TaskKind::CommentAndPost => &[
                CheckInFlag::Comment,
                CheckInFlag::PostArticle,
                CheckInFlag::CommentAndPost,
            ],
            TaskKind::Workout => &[CheckInFlag::Workout],
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("Unknown task kind: {}", s)))
    }
}

/// Storage-level completion flag.
///
/// Six flags mirror the task kinds; `comment` and `post_article` are the two
/// sub-actions behind `comment_and_post`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInFlag {
    MealLog,
    WaterLog,
    WeightLog,
    BodyMeasurementLog,
    CommentAndPost,
    Workout,
    Comment,
    PostArticle,
}

impl CheckInFlag {
    pub const ALL: [CheckInFlag; 8] = [
        CheckInFlag::MealLog,
        CheckInFlag::WaterLog,
        CheckInFlag::WeightLog,
        CheckInFlag::BodyMeasurementLog,
        CheckInFlag::CommentAndPost,
        CheckInFlag::Workout,
        CheckInFlag::Comment,
        CheckInFlag::PostArticle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInFlag::MealLog => "meal_log",
            CheckInFlag::WaterLog => "water_log",
            CheckInFlag::WeightLog => "weight_log",
            CheckInFlag::BodyMeasurementLog => "body_measurement_log",
            CheckInFlag::CommentAndPost => "comment_and_post",
            CheckInFlag::Workout => "workout",
            CheckInFlag::Comment => "comment",
            CheckInFlag::PostArticle => "post_article",
        }
    }
}

impl From<TaskKind> for CheckInFlag {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::MealLog => CheckInFlag::MealLog,
            TaskKind::WaterLog => CheckInFlag::WaterLog,
            TaskKind::WeightLog => CheckInFlag::WeightLog,
            TaskKind::BodyMeasurementLog => CheckInFlag::BodyMeasurementLog,
            TaskKind::CommentAndPost => CheckInFlag::CommentAndPost,
            TaskKind::Workout => CheckInFlag::Workout,
        }
    }
}

impl fmt::Display for CheckInFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckInFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckInFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("Unknown check-in flag: {}", s)))
    }
}

/// Storage key `@Checkin_{userId}_{flag}_{YYYY-MM-DD}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckInKey {
    pub user_id: UserId,
    pub flag: CheckInFlag,
    pub date: NaiveDate,
}

impl CheckInKey {
    pub fn new(user_id: UserId, flag: CheckInFlag, date: NaiveDate) -> Self {
        Self {
            user_id,
            flag,
            date,
        }
    }

    /// Parse a key previously produced by `Display`.
    ///
    /// The flag itself contains underscores, so the user id is taken from the
    /// front and the date from the back.
    pub fn parse(key: &str) -> Result<Self, DomainError> {
        let rest = key
            .strip_prefix(CHECK_IN_KEY_PREFIX)
            .ok_or_else(|| DomainError::InvalidInput(format!("Not a check-in key: {}", key)))?;

        let (head, date) = rest
            .rsplit_once('_')
            .ok_or_else(|| DomainError::InvalidInput(format!("Missing date in key: {}", key)))?;
        let (user_id, flag) = head
            .split_once('_')
            .ok_or_else(|| DomainError::InvalidInput(format!("Missing flag in key: {}", key)))?;

        Ok(Self {
            user_id: user_id.parse()?,
            flag: flag.parse()?,
            date: parse_calendar_date(date)?,
        })
    }
}

impl fmt::Display for CheckInKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}_{}",
            CHECK_IN_KEY_PREFIX,
            self.user_id,
            self.flag,
            format_calendar_date(self.date)
        )
    }
}

/// One completion entry as held by the key store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    pub user_id: UserId,
    pub flag: CheckInFlag,
    pub date: NaiveDate,
    pub completed: bool,
}

impl CheckInRecord {
    /// Only the literal completion marker counts as done
    pub fn from_stored(key: CheckInKey, value: Option<&str>) -> Self {
        Self {
            user_id: key.user_id,
            flag: key.flag,
            date: key.date,
            completed: value == Some(COMPLETED_VALUE),
        }
    }
}
