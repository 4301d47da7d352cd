//! Demo dataset: a fixed catalog of habits with backdated history.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::HabitCollection;
use crate::habit::Periodicity;
use crate::outcome::Outcome;

/// Canonical example habits spanning both periodicities.
pub const CATALOG: [(&str, Periodicity); 5] = [
    ("Exercise", Periodicity::Daily),
    ("Shopping", Periodicity::Weekly),
    ("Meditate", Periodicity::Daily),
    ("Reading", Periodicity::Daily),
    ("Cleaning", Periodicity::Weekly),
];

/// Most weeks of history a single seed may generate (10 years).
pub const MAX_SEED_WEEKS: u32 = 520;

impl HabitCollection {
    /// Append `weeks` weeks of backdated completions to every catalog habit,
    /// creating the ones that are missing.
    ///
    /// Daily habits get one completion per day, weekly habits one per week,
    /// counting back from `now`. The already-checked-off rule does not apply
    /// here; each habit's streak is recomputed once at the end. More than
    /// [`MAX_SEED_WEEKS`] weeks is rejected before anything is generated.
    pub fn seed(&mut self, now: DateTime<Utc>, weeks: u32) -> Outcome {
        if weeks > MAX_SEED_WEEKS {
            return Outcome::rejected(format!(
                "Cannot seed {weeks} weeks of history; the limit is {MAX_SEED_WEEKS}."
            ));
        }

        for (name, periodicity) in CATALOG {
            let completions = backdated(periodicity, now, weeks);
            let habit = self.entry_or_create(name, periodicity, now);
            habit.extend_completions(completions);
        }

        info!(weeks, habits = CATALOG.len(), "seeded example habits");
        Outcome::success("Predefined habits with example tracking data loaded successfully.")
    }
}

fn backdated(periodicity: Periodicity, now: DateTime<Utc>, weeks: u32) -> Vec<DateTime<Utc>> {
    let weeks = i64::from(weeks);
    match periodicity {
        Periodicity::Daily => (0..weeks)
            .flat_map(|week| (0..7).map(move |day| now - Duration::days(week * 7 + day)))
            .collect(),
        Periodicity::Weekly => (0..weeks).map(|week| now - Duration::weeks(week)).collect(),
    }
}
