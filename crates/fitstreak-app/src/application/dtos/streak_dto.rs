use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use fitstreak_domain::check_in::format_calendar_date;
use fitstreak_domain::streak::{CalendarDay, MonthCalendar, MonthStats, StreakStats};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakChainDto {
    /// Absent for offline derivations
    pub user_id: Option<i64>,
    pub current_streak: u32,
    pub last_check_in_date: Option<String>, // YYYY-MM-DD
    /// Oldest first
    pub dates: Vec<String>,
}

impl StreakChainDto {
    pub fn new(
        user_id: Option<i64>,
        current_streak: u32,
        last_check_in_date: Option<NaiveDate>,
        chain: &[NaiveDate],
    ) -> Self {
        Self {
            user_id,
            current_streak,
            last_check_in_date: last_check_in_date.map(format_calendar_date),
            dates: chain.iter().copied().map(format_calendar_date).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyRunsDto {
    /// `YYYY-MM` -> longest consecutive run inside that month
    pub months: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakStatsDto {
    pub user_id: i64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_in_days: u32,
    pub last_check_in_date: Option<String>,
}

impl StreakStatsDto {
    pub fn new(user_id: i64, stats: &StreakStats) -> Self {
        Self {
            user_id,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
            total_check_in_days: stats.total_check_in_days,
            last_check_in_date: stats.last_check_in_date.map(format_calendar_date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDayDto {
    pub date: String,
    pub is_checked_in: bool,
    pub in_active_streak: bool,
}

impl From<&CalendarDay> for CalendarDayDto {
    fn from(day: &CalendarDay) -> Self {
        Self {
            date: format_calendar_date(day.date),
            is_checked_in: day.is_checked_in,
            in_active_streak: day.in_active_streak,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub checked_in_days: u32,
    pub check_in_rate: f64, // 0.0 - 100.0
    pub longest_run: u32,
}

impl From<&MonthStats> for MonthStatsDto {
    fn from(stats: &MonthStats) -> Self {
        Self {
            total_days: stats.total_days,
            checked_in_days: stats.checked_in_days,
            check_in_rate: stats.check_in_rate,
            longest_run: stats.longest_run,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDto {
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDayDto>,
    pub month_stats: MonthStatsDto,
}

impl CalendarDto {
    pub fn new(user_id: i64, calendar: &MonthCalendar) -> Self {
        Self {
            user_id,
            year: calendar.year,
            month: calendar.month,
            days: calendar.days.iter().map(CalendarDayDto::from).collect(),
            month_stats: MonthStatsDto::from(&calendar.stats),
        }
    }
}
