use clap::{Parser, Subcommand};
use habitual_core::storage::data_dir;
use habitual_core::MAX_SEED_WEEKS;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{CmdResult, Context, Credentials};

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habitual habit tracker CLI")]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User registration
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Streak and lapse analysis
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Load example habits with backdated history
    Seed {
        /// Weeks of history to generate (defaults to tracking.seed_weeks)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SEED_WEEKS)))]
        weeks: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive menu
    Shell,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Config commands work on the raw data directory so a broken
/// `config.toml` can still be inspected and reset.
fn run(cli: Cli) -> CmdResult {
    let dir = data_dir()?;
    let context = || Context::in_dir(dir.clone(), cli.credentials.clone());

    match cli.command {
        Commands::User { action } => commands::user::run(action, &context()?),
        Commands::Habit { action } => commands::habit::run(action, &context()?),
        Commands::Analyze { action } => commands::analyze::run(action, &context()?),
        Commands::Seed { weeks } => commands::habit::seed(weeks, &context()?),
        Commands::Config { action } => commands::config::run(action, &dir),
        Commands::Shell => commands::shell::run(&context()?),
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
