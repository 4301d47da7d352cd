use std::io::Write;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use habitual_core::HabitCollection;

use super::{report, CmdResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// "daily" or "weekly"
        #[arg(long)]
        periodicity: String,
    },
    /// Delete a habit and its history
    Delete {
        /// Habit name
        name: String,
    },
    /// Mark a habit as done for the current period
    CheckOff {
        /// Habit name
        name: String,
    },
    /// List all habits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HabitAction, ctx: &Context) -> CmdResult {
    let mut session = ctx.session()?;
    let mut out = std::io::stdout();
    let now = Utc::now();

    match action {
        HabitAction::Add { name, periodicity } => {
            let outcome = session.add_habit(&name, &periodicity, now)?;
            report(&mut out, &outcome)
        }
        HabitAction::Delete { name } => {
            let outcome = session.delete_habit(&name)?;
            report(&mut out, &outcome)
        }
        HabitAction::CheckOff { name } => {
            let outcome = session.check_off(&name, now)?;
            report(&mut out, &outcome)
        }
        HabitAction::List { json } => {
            if json {
                let rows = session.habits().overview(now);
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
                Ok(())
            } else {
                render_list(&mut out, session.habits(), now)
            }
        }
    }
}

/// Load the example catalog for the logged-in user.
pub fn seed(weeks: Option<u32>, ctx: &Context) -> CmdResult {
    let mut session = ctx.session()?;
    let weeks = weeks.unwrap_or(ctx.config.tracking.seed_weeks);
    let outcome = session.seed(Utc::now(), weeks)?;
    let mut out = std::io::stdout();
    report(&mut out, &outcome)?;
    render_list(&mut out, session.habits(), Utc::now())
}

pub fn render_list(out: &mut dyn Write, habits: &HabitCollection, now: DateTime<Utc>) -> CmdResult {
    if habits.is_empty() {
        writeln!(out, "No habits defined yet.")?;
        return Ok(());
    }

    writeln!(out, "All Habits:")?;
    for row in habits.overview(now) {
        let last = row
            .last_completion
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());
        let status = if row.lapsed { "lapsed" } else { "on track" };
        writeln!(
            out,
            " - {} ({}), Streak: {}, Last Checked Off: {}, Created At: {}, Status: {}",
            row.name,
            row.periodicity,
            row.streak,
            last,
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            status
        )?;
    }
    Ok(())
}
