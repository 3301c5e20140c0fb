//! Completion analytics over a habit's completed-day set.
//!
//! Every function here is pure: the reference day is passed in by the caller
//! (normally `DayKey::today()`), never read from a clock.

use serde::Serialize;

use crate::{DayKey, Habit};

/// Upper bound on the backward walk in [`current_streak`].
const STREAK_LOOKBACK_DAYS: u32 = 365;

/// Default window for [`completion_rate`].
pub const DEFAULT_RATE_WINDOW_DAYS: u32 = 30;

/// Whether the habit was completed on the given day.
pub fn completed_on(habit: &Habit, day: DayKey) -> bool {
    habit.completed_dates.contains(&day)
}

/// Consecutive completed days ending at `today`.
///
/// A miss on `today` itself breaks the streak immediately, there is no grace
/// day. The walk stops at the first gap or after [`STREAK_LOOKBACK_DAYS`].
pub fn current_streak(habit: &Habit, today: DayKey) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while habit.completed_dates.contains(&day) {
        streak += 1;
        if streak == STREAK_LOOKBACK_DAYS {
            break;
        }
        match day.days_before(1) {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Share of the most recent `window_days` days, inclusive of `today`, that
/// appear in the completed set, rounded to the nearest integer percent.
/// A zero-length window rates 0.
pub fn completion_rate(habit: &Habit, today: DayKey, window_days: u32) -> u32 {
    if window_days == 0 {
        return 0;
    }
    let completed = (0..window_days)
        .filter_map(|offset| today.days_before(u64::from(offset)))
        .filter(|day| habit.completed_dates.contains(day))
        .count() as u32;
    (completed * 100 + window_days / 2) / window_days
}

/// Lifetime completion count.
pub fn total_completions(habit: &Habit) -> usize {
    habit.completed_dates.len()
}

/// Every per-habit statistic the presentation layer shows, in one shot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub completed_today: bool,
    pub current_streak: u32,
    pub completion_rate: u32,
    pub total_completions: usize,
}

pub fn summarize(habit: &Habit, today: DayKey) -> HabitStats {
    HabitStats {
        completed_today: completed_on(habit, today),
        current_streak: current_streak(habit, today),
        completion_rate: completion_rate(habit, today, DEFAULT_RATE_WINDOW_DAYS),
        total_completions: total_completions(habit),
    }
}
