//! Habit records.
//!
//! A [`Habit`] owns its completion history and the streak derived from it.
//! Fields are private: the only ways to add history are [`Habit::check_off`]
//! (one completion, subject to the already-checked-off rule) and
//! [`Habit::extend_completions`] (bulk append without that rule). Both
//! recompute the streak before returning.

pub mod streak;
pub mod timestamp;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use streak::CheckOff;

/// Cadence a habit is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Daily,
    Weekly,
}

impl Periodicity {
    pub const ALL: [Periodicity; 2] = [Periodicity::Daily, Periodicity::Weekly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
        }
    }

    /// Noun used in messages ("already checked off for the current day").
    pub fn period_label(&self) -> &'static str {
        match self {
            Periodicity::Daily => "day",
            Periodicity::Weekly => "week",
        }
    }

    /// Largest calendar-day gap to the latest completion before a habit
    /// counts as lapsed.
    pub fn allowed_gap_days(&self) -> i64 {
        match self {
            Periodicity::Daily => 1,
            Periodicity::Weekly => 7,
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            _ => Err(ValidationError::InvalidPeriodicity(s.to_string())),
        }
    }
}

/// A single trackable habit.
///
/// Serialized as `{name, periodicity, created_at, checkoffs, streak}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    name: String,
    periodicity: Periodicity,
    #[serde(default = "Utc::now", deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(
        rename = "checkoffs",
        default,
        deserialize_with = "timestamp::deserialize_list"
    )]
    completions: Vec<DateTime<Utc>>,
    /// Longest run ever observed. Never the live run length.
    #[serde(default)]
    streak: u32,
}

impl Habit {
    /// A fresh habit with no history.
    pub fn new(name: impl Into<String>, periodicity: Periodicity, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            periodicity,
            created_at,
            completions: Vec::new(),
            streak: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completion instants. Chronological after any recompute.
    pub fn completions(&self) -> &[DateTime<Utc>] {
        &self.completions
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_completion(&self) -> Option<DateTime<Utc>> {
        self.completions.iter().max().copied()
    }

    /// Record a completion at `now` unless this period is already covered.
    pub fn check_off(&mut self, now: DateTime<Utc>) -> CheckOff {
        streak::check_off(self, now)
    }

    /// Append many completions without the already-checked-off rule, then
    /// recompute the streak once.
    pub fn extend_completions<I>(&mut self, completions: I)
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        self.completions.extend(completions);
        streak::recompute_streak(self);
    }

    pub fn recompute_streak(&mut self) {
        streak::recompute_streak(self);
    }

    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        streak::is_lapsed(self, now)
    }
}
