//! Command handlers and the state they share.

pub mod analyze;
pub mod config;
pub mod habit;
pub mod shell;
pub mod user;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use habitual_core::{Config, JsonCredentialStore, JsonHabitStore, Outcome, OutcomeStatus, Session};
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Who is running the command.
#[derive(Args, Clone, Default)]
pub struct Credentials {
    /// Username to act as
    #[arg(short, long, global = true, env = "HABITUAL_USER")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(short, long, global = true, env = "HABITUAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Data directory, configuration and credentials for one invocation.
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub credentials: Credentials,
}

impl Context {
    pub fn in_dir(dir: PathBuf, credentials: Credentials) -> Result<Self, Box<dyn Error>> {
        let config = Config::load_from(&dir)?;
        debug!(dir = %dir.display(), "using data directory");
        Ok(Self {
            dir,
            config,
            credentials,
        })
    }

    pub fn credential_store(&self) -> JsonCredentialStore {
        JsonCredentialStore::new(self.config.users_path(&self.dir))
    }

    pub fn habit_store(&self) -> JsonHabitStore {
        JsonHabitStore::new(&self.dir)
    }

    /// Log in with the command-line credentials.
    pub fn session(&self) -> Result<Session<JsonHabitStore>, Box<dyn Error>> {
        let username = self.credentials.user.as_deref().ok_or(
            "not logged in: pass --user and --password (or set HABITUAL_USER and HABITUAL_PASSWORD)",
        )?;
        let password = self.credentials.password.as_deref().unwrap_or_default();
        let session = Session::login(
            &self.credential_store(),
            self.habit_store(),
            username,
            password,
        )?;
        Ok(session)
    }
}

/// Print the outcome. Rejections and unknown names become errors so the
/// process exits non-zero; no-ops are not failures.
pub fn report(out: &mut dyn Write, outcome: &Outcome) -> CmdResult {
    match outcome.status {
        OutcomeStatus::Success | OutcomeStatus::NoOp => {
            writeln!(out, "{outcome}")?;
            Ok(())
        }
        OutcomeStatus::Rejected | OutcomeStatus::NotFound => Err(outcome.message.clone().into()),
    }
}
