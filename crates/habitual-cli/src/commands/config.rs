use std::path::Path;

use clap::Subcommand;
use habitual_core::Config;

use super::CmdResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "tracking.lookback_days")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the data directory
    Path,
}

pub fn run(action: ConfigAction, dir: &Path) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(dir)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(dir)?;
            config.set(&key, &value)?;
            config.save_to(dir)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_from(dir)?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save_to(dir)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => println!("{}", dir.display()),
    }
    Ok(())
}
