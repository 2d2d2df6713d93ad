// Workout streak calculation
// A streak is a run of consecutive days with at least one logged workout

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Result of streak calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakResult {
    pub current: u32,
    pub longest: u32,
}

/// Calculate streaks from workout dates (any order, duplicates allowed).
/// The current streak survives until the end of the day after the last workout.
pub fn calculate_streak(dates: &[NaiveDate], today: NaiveDate) -> StreakResult {
    if dates.is_empty() {
        return StreakResult::default();
    }

    let date_set: HashSet<NaiveDate> = dates.iter().copied().collect();
    let yesterday = today - Duration::days(1);

    let mut check_date = if date_set.contains(&today) {
        today
    } else if date_set.contains(&yesterday) {
        yesterday
    } else {
        return StreakResult {
            current: 0,
            longest: calculate_longest_streak(dates),
        };
    };

    let mut current = 0;
    while date_set.contains(&check_date) {
        current += 1;
        check_date -= Duration::days(1);
    }

    StreakResult {
        current,
        longest: calculate_longest_streak(dates).max(current),
    }
}

/// Longest run of consecutive days anywhere in the history
fn calculate_longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort();
    sorted.dedup();

    if sorted.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;

    for pair in sorted.windows(2) {
        if pair[1] == pair[0] + Duration::days(1) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }

    longest
}
