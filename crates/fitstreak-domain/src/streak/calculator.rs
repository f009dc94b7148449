use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::check_in::{month_key, parse_calendar_date};
use crate::shared::DomainError;

/// Aggregate streak figures over a check-in history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_in_days: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

/// Upper bound on a streak counter accepted from outside (about a century).
pub const MAX_STREAK_DAYS: u32 = 36_600;

/// Consecutive dates ending at `last_check_in_date`, oldest first.
///
/// Empty when there is no last check-in or the streak is zero.
pub fn derive_streak_chain(
    last_check_in_date: Option<NaiveDate>,
    current_streak: u32,
) -> Vec<NaiveDate> {
    let Some(last) = last_check_in_date else {
        return Vec::new();
    };
    let wanted = current_streak as usize;
    if wanted == 0 {
        return Vec::new();
    }

    let mut chain = Vec::with_capacity(wanted.min(366));
    let mut cursor = Some(last);
    while let Some(date) = cursor {
        chain.push(date);
        if chain.len() == wanted {
            break;
        }
        cursor = date.pred_opt();
    }

    if chain.len() < wanted {
        debug!(
            "[streak] chain truncated at minimum date wanted={} got={}",
            wanted,
            chain.len()
        );
    }

    chain.reverse();
    chain
}

/// The part of a streak chain that falls inside `from..=to`, oldest first.
///
/// Only the overlap is materialised, whatever the streak length.
pub fn streak_chain_between(
    last_check_in_date: Option<NaiveDate>,
    current_streak: u32,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    let Some(last) = last_check_in_date else {
        return Vec::new();
    };
    if current_streak == 0 {
        return Vec::new();
    }

    let start = last
        .checked_sub_days(Days::new(u64::from(current_streak - 1)))
        .unwrap_or(NaiveDate::MIN);
    let lo = start.max(from);
    let hi = last.min(to);
    if lo > hi {
        return Vec::new();
    }

    lo.iter_days().take_while(|d| *d <= hi).collect()
}

/// Longest run of consecutive days inside each `YYYY-MM` month.
///
/// Months without dates are absent from the result. Duplicates are ignored.
pub fn longest_runs_by_month<I>(dates: I) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let sorted: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut result = BTreeMap::new();

    let mut prev: Option<NaiveDate> = None;
    let mut run = 0u32;
    let mut best = 0u32;

    for date in sorted {
        match prev {
            Some(p) if same_month(p, date) => {
                run = if p.succ_opt() == Some(date) { run + 1 } else { 1 };
            }
            Some(p) => {
                result.insert(month_key(p), best);
                run = 1;
                best = 0;
            }
            None => run = 1,
        }
        best = best.max(run);
        prev = Some(date);
    }

    if let Some(p) = prev {
        result.insert(month_key(p), best);
    }

    result
}

/// String form of [`longest_runs_by_month`]; any malformed date fails the call.
pub fn longest_runs_by_month_str<S: AsRef<str>>(
    dates: &[S],
) -> Result<BTreeMap<String, u32>, DomainError> {
    let parsed = dates
        .iter()
        .map(|d| parse_calendar_date(d.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(longest_runs_by_month(parsed))
}

/// Streak figures as of `today`.
///
/// The current streak is the run ending at the latest check-in, provided that
/// check-in happened today or yesterday.
pub fn compute_streak_stats<I>(dates: I, today: NaiveDate) -> StreakStats
where
    I: IntoIterator<Item = NaiveDate>,
{
    let sorted: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut prev: Option<NaiveDate> = None;
    let mut run = 0u32;
    let mut longest = 0u32;

    for date in &sorted {
        run = match prev {
            Some(p) if p.succ_opt() == Some(*date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }

    let is_active = prev.is_some_and(|last| (today - last).num_days() <= 1);

    StreakStats {
        current_streak: if is_active { run } else { 0 },
        longest_streak: longest,
        total_check_in_days: sorted.len() as u32,
        last_check_in_date: prev,
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_calendar_date(s).unwrap()
    }

    fn strs(dates: &[NaiveDate]) -> Vec<String> {
        dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }

    #[test]
    fn test_chain_ends_at_last_check_in() {
        let chain = derive_streak_chain(Some(d("2024-03-10")), 3);
        assert_eq!(strs(&chain), vec!["2024-03-08", "2024-03-09", "2024-03-10"]);
    }

    #[test]
    fn test_chain_empty_cases() {
        assert!(derive_streak_chain(None, 0).is_empty());
        assert!(derive_streak_chain(None, 5).is_empty());
        assert!(derive_streak_chain(Some(d("2024-03-10")), 0).is_empty());
    }

    #[test]
    fn test_chain_crosses_month_and_leap_day() {
        let chain = derive_streak_chain(Some(d("2024-03-01")), 3);
        assert_eq!(strs(&chain), vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_chain_length_and_spacing_hold_for_long_streaks() {
        for n in [1u32, 2, 31, 365, 1000] {
            let last = d("2025-01-01");
            let chain = derive_streak_chain(Some(last), n);

            assert_eq!(chain.len(), n as usize);
            assert_eq!(chain.last(), Some(&last));
            assert!(chain.windows(2).all(|w| w[0].succ_opt() == Some(w[1])));
        }
    }

    #[test]
    fn test_chain_truncates_at_minimum_date() {
        let chain = derive_streak_chain(NaiveDate::MIN.succ_opt(), 10);
        assert_eq!(chain, vec![NaiveDate::MIN, NaiveDate::MIN.succ_opt().unwrap()]);
    }

    #[test]
    fn test_chain_between_clips_to_window() {
        let (from, to) = (d("2024-03-01"), d("2024-03-31"));

        let chain = streak_chain_between(Some(d("2024-03-02")), 5, from, to);
        assert_eq!(strs(&chain), vec!["2024-03-01", "2024-03-02"]);

        assert!(streak_chain_between(Some(d("2024-02-10")), 3, from, to).is_empty());
        assert!(streak_chain_between(None, 3, from, to).is_empty());
        assert!(streak_chain_between(Some(d("2024-03-02")), 0, from, to).is_empty());
    }

    #[test]
    fn test_chain_between_handles_huge_streak() {
        let chain =
            streak_chain_between(Some(d("2024-03-10")), u32::MAX, d("2024-03-01"), d("2024-03-31"));
        assert_eq!(chain.len(), 10);
        assert_eq!(chain.first(), Some(&d("2024-03-01")));
        assert_eq!(chain.last(), Some(&d("2024-03-10")));
    }

    #[test]
    fn test_chain_between_matches_full_chain() {
        let last = d("2024-04-03");
        let full = derive_streak_chain(Some(last), 40);
        let clipped = streak_chain_between(Some(last), 40, d("2024-03-01"), d("2024-03-31"));
        let expected: Vec<NaiveDate> = full.into_iter().filter(|d| d.month() == 3).collect();
        assert_eq!(clipped, expected);
    }

    #[test]
    fn test_longest_runs_single_month() {
        let runs =
            longest_runs_by_month_str(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-10"])
                .unwrap();

        assert_eq!(runs.len(), 1);
        assert_eq!(runs.get("2024-01"), Some(&3));
    }

    #[test]
    fn test_longest_runs_empty_input() {
        let runs = longest_runs_by_month(Vec::<NaiveDate>::new());
        assert!(runs.is_empty());
    }

    #[test]
    fn test_longest_runs_is_order_independent_and_splits_months() {
        let runs = longest_runs_by_month_str(&[
            "2024-02-01",
            "2024-01-31",
            "2024-01-30",
            "2024-02-05",
            "2024-02-02",
            "2023-12-25",
        ])
        .unwrap();

        assert_eq!(runs.get("2023-12"), Some(&1));
        assert_eq!(runs.get("2024-01"), Some(&2));
        assert_eq!(runs.get("2024-02"), Some(&2));
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn test_longest_runs_ignores_duplicates() {
        let runs =
            longest_runs_by_month_str(&["2024-01-01", "2024-01-01", "2024-01-02", "2024-01-02"])
                .unwrap();
        assert_eq!(runs.get("2024-01"), Some(&2));
    }

    #[test]
    fn test_longest_runs_same_month_different_year() {
        let runs = longest_runs_by_month_str(&["2023-05-01", "2024-05-02"]).unwrap();
        assert_eq!(runs.get("2023-05"), Some(&1));
        assert_eq!(runs.get("2024-05"), Some(&1));
    }

    #[test]
    fn test_longest_runs_rejects_malformed_date() {
        let result = longest_runs_by_month_str(&["2024-01-01", "2024-01-32"]);
        assert!(matches!(result, Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_stats_active_streak() {
        let dates = [
            d("2024-03-01"),
            d("2024-03-02"),
            d("2024-03-03"),
            d("2024-03-04"),
            d("2024-03-08"),
            d("2024-03-09"),
        ];
        let stats = compute_streak_stats(dates, d("2024-03-10"));

        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 4);
        assert_eq!(stats.total_check_in_days, 6);
        assert_eq!(stats.last_check_in_date, Some(d("2024-03-09")));
    }

    #[test]
    fn test_stats_broken_streak() {
        let stats = compute_streak_stats([d("2024-03-01"), d("2024-03-02")], d("2024-03-10"));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_stats_empty_history() {
        let stats = compute_streak_stats(Vec::<NaiveDate>::new(), d("2024-03-10"));
        assert_eq!(
            stats,
            StreakStats {
                current_streak: 0,
                longest_streak: 0,
                total_check_in_days: 0,
                last_check_in_date: None,
            }
        );
    }
}
