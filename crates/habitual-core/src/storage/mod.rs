mod config;
pub mod credentials;
pub mod habits;

pub use config::{Config, StorageConfig, TrackingConfig};
pub use credentials::{CredentialStore, JsonCredentialStore};
pub use habits::{HabitStore, JsonHabitStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory.
///
/// `HABITUAL_DATA_DIR` wins when set. Otherwise `~/.config/habitual[-dev]/`
/// based on `HABITUAL_ENV`; set `HABITUAL_ENV=dev` to use the development
/// directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HABITUAL_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITUAL_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitual-dev")
            } else {
                base_dir.join("habitual")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
