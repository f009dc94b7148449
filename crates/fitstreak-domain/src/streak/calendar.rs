use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

use super::calculator::longest_runs_by_month;
use crate::check_in::month_key;
use crate::shared::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_checked_in: bool,
    pub in_active_streak: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub total_days: u32,
    pub checked_in_days: u32,
    /// Percentage 0.0 - 100.0
    pub check_in_rate: f64,
    pub longest_run: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub stats: MonthStats,
}

/// Lay out one month with check-in and active-streak markers.
pub fn build_month_calendar(
    year: i32,
    month: u32,
    check_in_dates: &[NaiveDate],
    active_chain: &[NaiveDate],
) -> Result<MonthCalendar, DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation(format!("Invalid month: {}", month)));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;
    let first_day_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = first_day_next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::Validation(format!("Invalid year: {}", year)))?;

    let checked: HashSet<NaiveDate> = check_in_dates
        .iter()
        .copied()
        .filter(|d| *d >= first_day && *d <= last_day)
        .collect();
    let chain: HashSet<NaiveDate> = active_chain.iter().copied().collect();

    let days: Vec<CalendarDay> = first_day
        .iter_days()
        .take_while(|d| *d <= last_day)
        .map(|date| CalendarDay {
            date,
            is_checked_in: checked.contains(&date),
            in_active_streak: chain.contains(&date),
        })
        .collect();

    let total_days = last_day.day();
    let checked_in_days = checked.len() as u32;
    let longest_run = longest_runs_by_month(checked.iter().copied())
        .get(&month_key(first_day))
        .copied()
        .unwrap_or(0);

    Ok(MonthCalendar {
        year,
        month,
        days,
        stats: MonthStats {
            total_days,
            checked_in_days,
            check_in_rate: (checked_in_days as f64 / total_days as f64) * 100.0,
            longest_run,
        },
    })
}
