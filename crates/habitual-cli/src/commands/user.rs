use clap::Subcommand;
use habitual_core::{CredentialStore, Session};

use super::{report, CmdResult, Context};

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user (password from --password)
    Register {
        /// Username to register
        username: String,
    },
    /// Check whether a username is taken
    Exists {
        /// Username to look up
        username: String,
    },
}

pub fn run(action: UserAction, ctx: &Context) -> CmdResult {
    let mut out = std::io::stdout();
    match action {
        UserAction::Register { username } => {
            let password = ctx.credentials.password.as_deref().unwrap_or_default();
            let outcome = Session::register(
                &ctx.credential_store(),
                &ctx.habit_store(),
                &username,
                password,
            )?;
            report(&mut out, &outcome)
        }
        UserAction::Exists { username } => {
            if ctx.credential_store().exists(&username) {
                println!("User '{username}' exists.");
            } else {
                println!("User '{username}' does not exist.");
            }
            Ok(())
        }
    }
}
