//! Integration tests for the habit analysis queries.

use chrono::{DateTime, Duration, TimeZone, Utc};
use habitual_core::{HabitCollection, OutcomeStatus, Periodicity};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 19, 30, 0).unwrap() + Duration::days(n - 1)
}

#[test]
fn daily_scenario_with_gap() {
    let mut habits = HabitCollection::new();
    habits.add("Journal", Periodicity::Daily, day(1));
    for d in [1, 2, 4] {
        assert!(habits.check_off("Journal", day(d)).is_success());
    }

    let journal = habits.get("Journal").unwrap();
    assert_eq!(journal.streak(), 2);
    assert!(!journal.is_lapsed(day(4)));
    assert!(journal.is_lapsed(day(6)));

    // lapsed at day 6 with recent activity
    assert_eq!(habits.struggled(day(6), Duration::days(30)), vec!["Journal"]);
}

#[test]
fn weekly_scenarios() {
    let mut habits = HabitCollection::new();
    habits.add("Laundry", Periodicity::Weekly, day(1));
    habits.add("Groceries", Periodicity::Weekly, day(1));

    for week in 0..4 {
        habits.check_off("Laundry", day(1 + 7 * week));
    }
    assert_eq!(habits.get("Laundry").unwrap().streak(), 4);

    for step in 0..4 {
        habits.check_off("Groceries", day(1 + 10 * step));
        assert_eq!(habits.get("Groceries").unwrap().streak(), 1);
    }

    let leaders = habits.longest_streak().unwrap();
    assert_eq!(leaders.streak, 4);
    assert_eq!(leaders.names(), vec!["Laundry"]);
    assert_eq!(
        habits.names_with_periodicity(Periodicity::Weekly),
        vec!["Groceries", "Laundry"]
    );
    assert!(habits.names_with_periodicity(Periodicity::Daily).is_empty());
}

#[test]
fn empty_collection_queries() {
    let habits = HabitCollection::new();
    assert!(habits.longest_streak().is_none());
    assert!(habits.struggled(day(1), Duration::days(30)).is_empty());
    assert!(habits.overview(day(1)).is_empty());
}

#[test]
fn untouched_habit_is_lapsed_but_not_struggled() {
    let mut habits = HabitCollection::new();
    habits.add("Piano", Periodicity::Daily, day(1));

    assert!(habits.get("Piano").unwrap().is_lapsed(day(1)));
    assert!(habits.struggled(day(5), Duration::days(30)).is_empty());
}

#[test]
fn repeated_check_off_is_a_no_op() {
    let mut habits = HabitCollection::new();
    habits.add("Laundry", Periodicity::Weekly, day(1));

    assert!(habits.check_off("Laundry", day(1)).is_success());
    let again = habits.check_off("Laundry", day(6));
    assert_eq!(again.status, OutcomeStatus::NoOp);
    assert!(again.message.contains("current week"));
    assert_eq!(habits.get("Laundry").unwrap().completions().len(), 1);
}

#[test]
fn seeded_data_then_lapse() {
    let mut habits = HabitCollection::new();
    habits.seed(day(1), 4);

    let leaders = habits.longest_streak().unwrap();
    assert_eq!(leaders.streak, 28);
    assert_eq!(leaders.names(), vec!["Exercise", "Meditate", "Reading"]);
    assert!(habits.struggled(day(1), Duration::days(30)).is_empty());

    // Ten days later every daily habit has lapsed, weekly ones too.
    let later = day(11);
    assert_eq!(
        habits.struggled(later, Duration::days(30)),
        vec!["Cleaning", "Exercise", "Meditate", "Reading", "Shopping"]
    );
}
