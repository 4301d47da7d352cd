//! Username/password registry.
//!
//! Passwords are kept in plaintext in a single JSON object
//! (`{"alice": "secret"}`). This store is for telling local users apart,
//! not for protecting anything.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, StorageError};
use crate::outcome::Outcome;

/// Register and authenticate users.
pub trait CredentialStore {
    fn exists(&self, username: &str) -> bool;

    /// Add a user. Blank inputs and taken usernames are rejected outcomes,
    /// not errors.
    fn register(&self, username: &str, password: &str) -> Result<Outcome>;

    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Credentials in one JSON file.
#[derive(Debug, Clone)]
pub struct JsonCredentialStore {
    path: PathBuf,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files count as "no users yet".
    fn read_users(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(users) => users,
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring malformed users file: {e}");
                BTreeMap::new()
            }
        }
    }

    fn write_users(&self, users: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl CredentialStore for JsonCredentialStore {
    fn exists(&self, username: &str) -> bool {
        self.read_users().contains_key(username)
    }

    fn register(&self, username: &str, password: &str) -> Result<Outcome> {
        if username.trim().is_empty() {
            return Ok(Outcome::rejected(
                "Username cannot be blank. Please provide a valid username.",
            ));
        }
        if password.trim().is_empty() {
            return Ok(Outcome::rejected(
                "Password cannot be blank. Please provide a valid password.",
            ));
        }
        // The username doubles as a file name for the user's habits.
        if username.contains(['/', '\\']) || username.starts_with('.') {
            return Ok(Outcome::rejected(format!(
                "Username '{username}' contains characters that are not allowed."
            )));
        }

        let mut users = self.read_users();
        if users.contains_key(username) {
            return Ok(Outcome::rejected(
                "User already exists. Please choose a different username.",
            ));
        }

        users.insert(username.to_string(), password.to_string());
        self.write_users(&users)?;
        info!(user = username, "user registered");
        Ok(Outcome::success(format!(
            "User '{username}' registered successfully."
        )))
    }

    fn authenticate(&self, username: &str, password: &str) -> bool {
        self.read_users()
            .get(username)
            .is_some_and(|stored| stored == password)
    }
}
