//! Logged-in user context.
//!
//! A [`Session`] owns the authenticated username, that user's habit
//! collection, and the store the collection came from. Every successful
//! mutation is written through to the store before the outcome is returned.
//! Outcomes that changed nothing are not persisted.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::collection::HabitCollection;
use crate::error::{LoginError, Result, StorageError};
use crate::habit::Periodicity;
use crate::outcome::Outcome;
use crate::storage::{CredentialStore, HabitStore};

pub struct Session<S: HabitStore> {
    username: String,
    habits: HabitCollection,
    store: S,
    load_warning: Option<String>,
}

impl<S: HabitStore> Session<S> {
    /// Register a user and give them an empty habit file.
    pub fn register<C: CredentialStore>(
        credentials: &C,
        store: &S,
        username: &str,
        password: &str,
    ) -> Result<Outcome> {
        let outcome = credentials.register(username, password)?;
        if outcome.is_success() {
            store.save(username, &HabitCollection::new())?;
        }
        Ok(outcome)
    }

    /// Authenticate and open the user's collection.
    pub fn login<C: CredentialStore>(
        credentials: &C,
        store: S,
        username: &str,
        password: &str,
    ) -> Result<Self, LoginError> {
        if !credentials.exists(username) {
            return Err(LoginError::UnknownUser(username.to_string()));
        }
        if !credentials.authenticate(username, password) {
            return Err(LoginError::IncorrectPassword);
        }
        Ok(Self::open(store, username))
    }

    /// Open `username`'s collection without checking credentials.
    ///
    /// Missing or malformed data yields an empty collection; the reason is
    /// kept in [`Session::load_warning`].
    pub fn open(store: S, username: &str) -> Self {
        let (habits, load_warning) = match store.load(username) {
            Ok(habits) => (habits, None),
            Err(e @ StorageError::Missing { .. }) => {
                info!(user = username, "no saved habits, starting fresh");
                (HabitCollection::new(), Some(e.to_string()))
            }
            Err(e) => {
                warn!(user = username, "could not load habits, starting empty: {e}");
                (HabitCollection::new(), Some(e.to_string()))
            }
        };

        info!(user = username, habits = habits.len(), "session opened");
        Self {
            username: username.to_string(),
            habits,
            store,
            load_warning,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn habits(&self) -> &HabitCollection {
        &self.habits
    }

    /// Why the collection started empty, if loading failed.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Add a habit from user input. Unknown periodicity strings are rejected.
    pub fn add_habit(&mut self, name: &str, periodicity: &str, now: DateTime<Utc>) -> Result<Outcome> {
        let periodicity: Periodicity = match periodicity.parse() {
            Ok(p) => p,
            Err(e) => return Ok(Outcome::rejected(e.to_string())),
        };
        let outcome = self.habits.add(name, periodicity, now);
        self.persist(outcome)
    }

    pub fn delete_habit(&mut self, name: &str) -> Result<Outcome> {
        let outcome = self.habits.delete(name);
        self.persist(outcome)
    }

    pub fn check_off(&mut self, name: &str, now: DateTime<Utc>) -> Result<Outcome> {
        let outcome = self.habits.check_off(name, now);
        self.persist(outcome)
    }

    pub fn seed(&mut self, now: DateTime<Utc>, weeks: u32) -> Result<Outcome> {
        let outcome = self.habits.seed(now, weeks);
        self.persist(outcome)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.username, &self.habits)
    }

    /// Save and close the session.
    pub fn logout(self) -> Result<Outcome> {
        self.save()?;
        info!(user = %self.username, "logged out");
        Ok(Outcome::success(format!("User '{}' logged out.", self.username)))
    }

    fn persist(&self, outcome: Outcome) -> Result<Outcome> {
        if outcome.is_success() {
            self.save()?;
        }
        Ok(outcome)
    }
}
