//! # Habitual Core Library
//!
//! This library provides the core logic for the Habitual habit tracker.
//! All operations are available through the standalone `habitual` CLI, which
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Habit**: a record of one recurring habit with its completion history
//!   and the longest streak ever reached
//! - **Streak engine**: pure functions for check-off, streak recomputation
//!   and lapse detection under daily and weekly periodicity
//! - **Collection**: a user's habits keyed by name, with the analysis
//!   queries (longest streak, by periodicity, struggled) and demo seeding
//! - **Storage**: JSON habit files per user, a JSON credential file and a
//!   TOML configuration
//! - **Session**: the logged-in user's context with write-through saves
//!
//! Every function that depends on the current time takes it as an argument.
//!
//! ## Key Components
//!
//! - [`Habit`]: a single habit record
//! - [`HabitCollection`]: the owned name-to-habit mapping
//! - [`Session`]: authenticated access to one user's collection
//! - [`Outcome`]: structured success / no-op / rejected / not-found result

pub mod collection;
pub mod error;
pub mod habit;
pub mod outcome;
pub mod session;
pub mod storage;

pub use collection::{
    HabitCollection, HabitSummary, StreakLeaders, CATALOG, MAX_LOOKBACK_DAYS, MAX_SEED_WEEKS,
};
pub use error::{ConfigError, CoreError, LoginError, StorageError, ValidationError};
pub use habit::{CheckOff, Habit, Periodicity};
pub use outcome::{Outcome, OutcomeStatus};
pub use session::Session;
pub use storage::{Config, CredentialStore, HabitStore, JsonCredentialStore, JsonHabitStore};
