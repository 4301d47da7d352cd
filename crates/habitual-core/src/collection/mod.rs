//! A user's habit collection and the queries over it.
//!
//! The collection owns every [`Habit`] keyed by name; callers only ever
//! borrow records. Mutations return an [`Outcome`] describing what happened
//! and leave persistence to the session layer.

mod seed;

pub use seed::{CATALOG, MAX_SEED_WEEKS};

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::habit::{CheckOff, Habit, Periodicity};
use crate::outcome::Outcome;

/// Upper bound accepted for a configured struggled-query window (100 years).
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Owned mapping from habit name to record, iterated in name order.
///
/// Serializes as a JSON object keyed by habit name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HabitCollection {
    habits: BTreeMap<String, Habit>,
}

/// Habits sharing the highest streak in a non-empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakLeaders<'a> {
    pub streak: u32,
    pub habits: Vec<&'a Habit>,
}

impl StreakLeaders<'_> {
    /// No habit has completed even a single period.
    pub fn is_empty_streak(&self) -> bool {
        self.streak == 0
    }

    pub fn names(&self) -> Vec<&str> {
        self.habits.iter().map(|h| h.name()).collect()
    }
}

/// One row of the "view all habits" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitSummary {
    pub name: String,
    pub periodicity: Periodicity,
    pub streak: u32,
    pub completions: usize,
    pub last_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub lapsed: bool,
}

impl HabitCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Habit> {
        self.habits.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.habits.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.habits.keys().map(String::as_str).collect()
    }

    /// Create a habit with no history.
    ///
    /// Blank names and names already in use are rejected.
    pub fn add(&mut self, name: &str, periodicity: Periodicity, now: DateTime<Utc>) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::rejected("Habit name cannot be blank.");
        }
        if self.habits.contains_key(name) {
            return Outcome::rejected(format!("Habit '{name}' already exists."));
        }

        self.habits
            .insert(name.to_string(), Habit::new(name, periodicity, now));
        info!(habit = name, %periodicity, "habit added");
        Outcome::success(format!(
            "Added habit: {name} with periodicity: {periodicity}."
        ))
    }

    pub fn delete(&mut self, name: &str) -> Outcome {
        match self.habits.remove(name) {
            Some(_) => {
                info!(habit = name, "habit deleted");
                Outcome::success(format!("Habit '{name}' has been deleted."))
            }
            None => Outcome::not_found(format!("Habit '{name}' not found.")),
        }
    }

    /// Check off the named habit at `now`.
    pub fn check_off(&mut self, name: &str, now: DateTime<Utc>) -> Outcome {
        let Some(habit) = self.habits.get_mut(name) else {
            return Outcome::not_found(format!("Habit '{name}' not found."));
        };

        match habit.check_off(now) {
            CheckOff::Recorded(at) => {
                info!(habit = name, streak = habit.streak(), "habit checked off");
                Outcome::success(format!(
                    "Habit '{name}' checked off at {}.",
                    at.format("%Y-%m-%d %H:%M:%S")
                ))
            }
            CheckOff::AlreadyCheckedOff => Outcome::no_op(format!(
                "Habit '{name}' is already checked off for the current {}.",
                habit.periodicity().period_label()
            )),
        }
    }

    /// Every habit tied for the highest streak, or `None` when there are no
    /// habits at all.
    pub fn longest_streak(&self) -> Option<StreakLeaders<'_>> {
        let streak = self.habits.values().map(Habit::streak).max()?;
        let habits = self
            .habits
            .values()
            .filter(|h| h.streak() == streak)
            .collect();
        Some(StreakLeaders { streak, habits })
    }

    pub fn names_with_periodicity(&self, periodicity: Periodicity) -> Vec<&str> {
        self.habits
            .values()
            .filter(|h| h.periodicity() == periodicity)
            .map(Habit::name)
            .collect()
    }

    /// Habits that were active inside the lookback window but are lapsed now.
    ///
    /// A habit qualifies when it is lapsed at `now`, was created no later
    /// than `now`, and has at least one completion at or after
    /// `now - window`. Habits that were never checked off do not qualify.
    /// A window reaching past the representable range covers all history.
    pub fn struggled(&self, now: DateTime<Utc>, window: Duration) -> Vec<&str> {
        let since = now
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.habits
            .values()
            .filter(|h| h.created_at() <= now)
            .filter(|h| h.is_lapsed(now))
            .filter(|h| h.completions().iter().any(|c| *c >= since))
            .map(Habit::name)
            .collect()
    }

    pub fn overview(&self, now: DateTime<Utc>) -> Vec<HabitSummary> {
        self.habits
            .values()
            .map(|h| HabitSummary {
                name: h.name().to_string(),
                periodicity: h.periodicity(),
                streak: h.streak(),
                completions: h.completions().len(),
                last_completion: h.last_completion(),
                created_at: h.created_at(),
                lapsed: h.is_lapsed(now),
            })
            .collect()
    }

    fn entry_or_create(&mut self, name: &str, periodicity: Periodicity, now: DateTime<Utc>) -> &mut Habit {
        self.habits
            .entry(name.to_string())
            .or_insert_with(|| Habit::new(name, periodicity, now))
    }
}

impl FromIterator<Habit> for HabitCollection {
    /// Records are re-keyed by their own name and their streaks recomputed.
    fn from_iter<I: IntoIterator<Item = Habit>>(iter: I) -> Self {
        let habits = iter
            .into_iter()
            .map(|mut habit| {
                habit.recompute_streak();
                (habit.name().to_string(), habit)
            })
            .collect();
        Self { habits }
    }
}

impl<'de> Deserialize<'de> for HabitCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = BTreeMap::<String, Habit>::deserialize(deserializer)?;
        Ok(records.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeStatus;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 8, 0, 0).unwrap()
    }

    #[test]
    fn add_rejects_blank_and_duplicate_names() {
        let mut habits = HabitCollection::new();
        assert!(habits.add("Run", Periodicity::Daily, day(1)).is_success());

        let dup = habits.add("Run", Periodicity::Weekly, day(1));
        assert_eq!(dup.status, OutcomeStatus::Rejected);
        assert_eq!(habits.get("Run").unwrap().periodicity(), Periodicity::Daily);

        let blank = habits.add("   ", Periodicity::Daily, day(1));
        assert_eq!(blank.status, OutcomeStatus::Rejected);
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut habits = HabitCollection::new();
        habits.add("Run", Periodicity::Daily, day(1));
        assert_eq!(habits.delete("Swim").status, OutcomeStatus::NotFound);
        assert!(habits.delete("Run").is_success());
        assert!(habits.is_empty());
    }

    #[test]
    fn check_off_reports_no_op_within_period() {
        let mut habits = HabitCollection::new();
        habits.add("Run", Periodicity::Daily, day(1));

        assert!(habits.check_off("Run", day(2)).is_success());
        let again = habits.check_off("Run", day(2));
        assert_eq!(again.status, OutcomeStatus::NoOp);
        assert!(again.message.contains("current day"));
        assert_eq!(habits.get("Run").unwrap().completions().len(), 1);

        assert_eq!(habits.check_off("Swim", day(2)).status, OutcomeStatus::NotFound);
    }

    #[test]
    fn longest_streak_includes_ties() {
        let mut habits = HabitCollection::new();
        habits.add("A", Periodicity::Daily, day(1));
        habits.add("B", Periodicity::Daily, day(1));
        habits.add("C", Periodicity::Weekly, day(1));
        for d in 1..=3 {
            habits.check_off("A", day(d));
            habits.check_off("B", day(d));
        }
        habits.check_off("C", day(1));

        let leaders = habits.longest_streak().unwrap();
        assert_eq!(leaders.streak, 3);
        assert_eq!(leaders.names(), vec!["A", "B"]);
    }

    #[test]
    fn longest_streak_distinguishes_empty_from_zero() {
        let mut habits = HabitCollection::new();
        assert!(habits.longest_streak().is_none());

        habits.add("A", Periodicity::Daily, day(1));
        let leaders = habits.longest_streak().unwrap();
        assert!(leaders.is_empty_streak());
        assert_eq!(leaders.names(), vec!["A"]);
    }

    #[test]
    fn filter_by_periodicity() {
        let mut habits = HabitCollection::new();
        habits.add("Read", Periodicity::Daily, day(1));
        habits.add("Clean", Periodicity::Weekly, day(1));
        habits.add("Walk", Periodicity::Daily, day(1));

        assert_eq!(habits.names_with_periodicity(Periodicity::Daily), vec!["Read", "Walk"]);
        assert_eq!(habits.names_with_periodicity(Periodicity::Weekly), vec!["Clean"]);
    }

    #[test]
    fn struggled_requires_recent_activity() {
        let mut habits = HabitCollection::new();
        habits.add("Dropped", Periodicity::Daily, day(1));
        habits.add("Active", Periodicity::Daily, day(1));
        habits.add("Untouched", Periodicity::Daily, day(1));
        habits.check_off("Dropped", day(2));
        habits.check_off("Active", day(9));

        let now = day(10);
        assert_eq!(habits.struggled(now, Duration::days(30)), vec!["Dropped"]);
        // window too short to see the old completion
        assert!(habits.struggled(now, Duration::days(3)).is_empty());
    }

    #[test]
    fn struggled_window_past_calendar_range_covers_all_history() {
        let mut habits = HabitCollection::new();
        habits.add("Dropped", Periodicity::Daily, day(1));
        habits.check_off("Dropped", day(2));

        let now = day(10);
        assert_eq!(habits.struggled(now, Duration::days(100_000_000)), vec!["Dropped"]);
        assert_eq!(habits.struggled(now, Duration::MAX), vec!["Dropped"]);
    }

    #[test]
    fn struggled_skips_habits_created_in_the_future() {
        let mut habits = HabitCollection::new();
        habits.add("Later", Periodicity::Daily, day(20));
        habits.get_mut_for_test("Later").extend_completions([day(2)]);
        assert!(habits.struggled(day(10), Duration::days(30)).is_empty());
    }

    #[test]
    fn overview_reports_lapsed_flag() {
        let mut habits = HabitCollection::new();
        habits.add("Read", Periodicity::Daily, day(1));
        habits.check_off("Read", day(3));

        let rows = habits.overview(day(4));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_completion, Some(day(3)));
        assert!(!rows[0].lapsed);
        assert!(habits.overview(day(6))[0].lapsed);
    }

    #[test]
    fn deserialize_rekeys_and_normalizes() {
        let json = r#"{
            "wrong-key": {
                "name": "Read",
                "periodicity": "daily",
                "created_at": "2024-06-01T08:00:00",
                "checkoffs": ["2024-06-03T08:00:00", "2024-06-02T08:00:00"],
                "streak": 0
            }
        }"#;
        let habits: HabitCollection = serde_json::from_str(json).unwrap();
        let read = habits.get("Read").unwrap();
        assert_eq!(read.streak(), 2);
        assert_eq!(read.completions(), &[day(2), day(3)]);
    }

    impl HabitCollection {
        fn get_mut_for_test(&mut self, name: &str) -> &mut Habit {
            self.habits.get_mut(name).unwrap()
        }
    }
}
