//! Streak and lapse engine.
//!
//! Everything here works on calendar dates (UTC) except the weekly
//! already-checked-off rule, which is a rolling 7-day window measured from
//! the exact instant. Weekly continuation likewise uses rolling day counts,
//! not ISO week boundaries.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::{Habit, Periodicity};

/// Result of a single check-off attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOff {
    /// The completion was appended and the streak recomputed.
    Recorded(DateTime<Utc>),
    /// The current period already has a completion; nothing changed.
    AlreadyCheckedOff,
}

/// Append `now` to the habit's history unless the period is already covered.
pub fn check_off(habit: &mut Habit, now: DateTime<Utc>) -> CheckOff {
    if already_checked_off(habit.periodicity, &habit.completions, now) {
        debug!(habit = %habit.name, %now, "check-off rejected, period already covered");
        return CheckOff::AlreadyCheckedOff;
    }

    habit.completions.push(now);
    recompute_streak(habit);
    CheckOff::Recorded(now)
}

/// Daily: some completion shares `now`'s calendar date.
/// Weekly: some completion is less than 7 days before `now` (or after it).
pub fn already_checked_off(
    periodicity: Periodicity,
    completions: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> bool {
    match periodicity {
        Periodicity::Daily => {
            let today = now.date_naive();
            completions.iter().any(|c| c.date_naive() == today)
        }
        Periodicity::Weekly => completions
            .iter()
            .any(|c| now.signed_duration_since(*c) < Duration::days(7)),
    }
}

/// Sort the history and raise the streak to the longest run found.
///
/// The streak is a high-water mark, so it only moves up, except that an
/// empty history always means a streak of zero.
pub fn recompute_streak(habit: &mut Habit) {
    if habit.completions.is_empty() {
        habit.streak = 0;
        return;
    }

    habit.completions.sort_unstable();
    let longest = longest_run(habit.periodicity, &habit.completions);
    let streak = habit.streak.max(longest);
    debug!(habit = %habit.name, longest, previous = habit.streak, streak, "streak recomputed");
    habit.streak = streak;
}

/// Length of the longest qualifying run in a chronologically sorted history.
pub fn longest_run(periodicity: Periodicity, sorted: &[DateTime<Utc>]) -> u32 {
    if sorted.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for pair in sorted.windows(2) {
        if continues_run(periodicity, pair[0], pair[1]) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

/// Whether `next` extends a run ending at `previous`.
pub fn continues_run(periodicity: Periodicity, previous: DateTime<Utc>, next: DateTime<Utc>) -> bool {
    let gap = day_gap(previous, next);
    match periodicity {
        Periodicity::Daily => gap == 1,
        Periodicity::Weekly => gap > 0 && gap <= 7,
    }
}

/// A habit with no history is lapsed; otherwise it is lapsed once the date
/// gap to its latest completion exceeds the periodicity's allowance.
pub fn is_lapsed(habit: &Habit, now: DateTime<Utc>) -> bool {
    match habit.completions.iter().max() {
        None => true,
        Some(last) => day_gap(*last, now) > habit.periodicity.allowed_gap_days(),
    }
}

fn day_gap(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
    }

    fn with_history(periodicity: Periodicity, days: &[u32]) -> Habit {
        let mut habit = Habit::new("h", periodicity, day(1));
        habit.extend_completions(days.iter().map(|d| day(*d)));
        habit
    }

    #[test]
    fn consecutive_days_build_a_streak() {
        let habit = with_history(Periodicity::Daily, &[1, 2, 3, 4]);
        assert_eq!(habit.streak(), 4);
    }

    #[test]
    fn daily_gap_keeps_longest_run() {
        let habit = with_history(Periodicity::Daily, &[1, 2, 4]);
        assert_eq!(habit.streak(), 2);
        assert!(!habit.is_lapsed(day(4)));
        assert!(!habit.is_lapsed(day(5)));
        assert!(habit.is_lapsed(day(6)));
    }

    #[test]
    fn same_day_completions_reset_daily_run() {
        let mut habit = Habit::new("h", Periodicity::Daily, day(1));
        habit.extend_completions([day(1), day(1) + Duration::hours(3), day(2)]);
        // [1, 1'] breaks (gap 0), [1', 2] continues
        assert_eq!(habit.streak(), 2);
    }

    #[test]
    fn weekly_exactly_seven_days_apart() {
        let habit = with_history(Periodicity::Weekly, &[1, 8, 15, 22]);
        assert_eq!(habit.streak(), 4);
        assert!(!habit.is_lapsed(day(29)));
        assert!(habit.is_lapsed(day(30)));
    }

    #[test]
    fn weekly_ten_days_apart_never_builds() {
        let mut habit = Habit::new("h", Periodicity::Weekly, day(1));
        for d in [1, 11, 21, 31] {
            habit.extend_completions([day(d)]);
            assert_eq!(habit.streak(), 1);
        }
    }

    #[test]
    fn streak_is_a_high_water_mark() {
        let mut habit = with_history(Periodicity::Daily, &[1, 2, 3]);
        assert_eq!(habit.streak(), 3);
        habit.extend_completions([day(10), day(11)]);
        assert_eq!(habit.streak(), 3);
        assert!(habit.is_lapsed(day(20)));
    }

    #[test]
    fn empty_history_is_lapsed_with_zero_streak() {
        let mut habit = Habit::new("h", Periodicity::Weekly, day(1));
        habit.recompute_streak();
        assert_eq!(habit.streak(), 0);
        assert!(habit.is_lapsed(day(1)));
    }

    #[test]
    fn daily_check_off_is_per_calendar_date() {
        let mut habit = Habit::new("h", Periodicity::Daily, day(1));
        let morning = Utc.with_ymd_and_hms(2024, 1, 5, 0, 30, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2024, 1, 6, 0, 5, 0).unwrap();

        assert_eq!(habit.check_off(morning), CheckOff::Recorded(morning));
        assert_eq!(habit.check_off(night), CheckOff::AlreadyCheckedOff);
        assert_eq!(habit.check_off(next), CheckOff::Recorded(next));
        assert_eq!(habit.completions().len(), 2);
        assert_eq!(habit.streak(), 2);
    }

    #[test]
    fn weekly_check_off_uses_a_rolling_window() {
        let mut habit = Habit::new("h", Periodicity::Weekly, day(1));
        assert!(matches!(habit.check_off(day(1)), CheckOff::Recorded(_)));
        assert_eq!(habit.check_off(day(7)), CheckOff::AlreadyCheckedOff);
        assert_eq!(
            habit.check_off(day(8) - Duration::seconds(1)),
            CheckOff::AlreadyCheckedOff
        );
        assert!(matches!(habit.check_off(day(8)), CheckOff::Recorded(_)));
        assert_eq!(habit.streak(), 2);
    }

    #[test]
    fn weekly_window_covers_future_completions() {
        let completions = [day(10)];
        assert!(already_checked_off(Periodicity::Weekly, &completions, day(2)));
    }

    #[test]
    fn longest_run_of_empty_history_is_zero() {
        assert_eq!(longest_run(Periodicity::Daily, &[]), 0);
        assert_eq!(longest_run(Periodicity::Weekly, &[day(3)]), 1);
    }

    #[test]
    fn continuation_rules() {
        assert!(continues_run(Periodicity::Daily, day(1), day(2)));
        assert!(!continues_run(Periodicity::Daily, day(1), day(3)));
        assert!(!continues_run(Periodicity::Weekly, day(1), day(1)));
        assert!(continues_run(Periodicity::Weekly, day(1), day(2)));
        assert!(continues_run(Periodicity::Weekly, day(1), day(8)));
        assert!(!continues_run(Periodicity::Weekly, day(1), day(9)));
    }
}
