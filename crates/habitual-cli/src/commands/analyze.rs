use std::io::Write;

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use habitual_core::{HabitCollection, Periodicity, MAX_LOOKBACK_DAYS};
use serde_json::json;

use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Habits with the longest streak
    Longest {
        #[arg(long)]
        json: bool,
    },
    /// Names of all daily habits
    Daily {
        #[arg(long)]
        json: bool,
    },
    /// Names of all weekly habits
    Weekly {
        #[arg(long)]
        json: bool,
    },
    /// Habits that were active recently but have lapsed
    Struggled {
        /// Lookback window in days (defaults to tracking.lookback_days)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LOOKBACK_DAYS)))]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AnalyzeAction, ctx: &Context) -> CmdResult {
    let session = ctx.session()?;
    let habits = session.habits();
    let mut out = std::io::stdout();

    match action {
        AnalyzeAction::Longest { json: true } => {
            let value = match habits.longest_streak() {
                Some(leaders) => json!({ "streak": leaders.streak, "habits": leaders.names() }),
                None => json!({ "streak": null, "habits": [] }),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            Ok(())
        }
        AnalyzeAction::Longest { json: false } => render_longest(&mut out, habits),
        AnalyzeAction::Daily { json } => by_periodicity(&mut out, habits, Periodicity::Daily, json),
        AnalyzeAction::Weekly { json } => by_periodicity(&mut out, habits, Periodicity::Weekly, json),
        AnalyzeAction::Struggled { days, json } => {
            let window = days
                .map(|d| Duration::days(i64::from(d)))
                .unwrap_or_else(|| ctx.config.lookback());
            if json {
                let names = habits.struggled(Utc::now(), window);
                writeln!(out, "{}", serde_json::to_string_pretty(&names)?)?;
                Ok(())
            } else {
                render_struggled(&mut out, habits, Utc::now(), window)
            }
        }
    }
}

fn by_periodicity(
    out: &mut dyn Write,
    habits: &HabitCollection,
    periodicity: Periodicity,
    json: bool,
) -> CmdResult {
    if json {
        let names = habits.names_with_periodicity(periodicity);
        writeln!(out, "{}", serde_json::to_string_pretty(&names)?)?;
        Ok(())
    } else {
        render_periodicity(out, habits, periodicity)
    }
}

pub fn render_longest(out: &mut dyn Write, habits: &HabitCollection) -> CmdResult {
    match habits.longest_streak() {
        None => writeln!(out, "No habits to analyze.")?,
        Some(leaders) if leaders.is_empty_streak() => writeln!(out, "No streaks found.")?,
        Some(leaders) => {
            writeln!(out, "Longest streak: {} periods.", leaders.streak)?;
            writeln!(
                out,
                "Habits with the longest streak: {}",
                leaders.names().join(", ")
            )?;
        }
    }
    Ok(())
}

pub fn render_periodicity(
    out: &mut dyn Write,
    habits: &HabitCollection,
    periodicity: Periodicity,
) -> CmdResult {
    let names = habits.names_with_periodicity(periodicity);
    if names.is_empty() {
        writeln!(out, "No {periodicity} habits found.")?;
    } else {
        writeln!(out, "Current {periodicity} habits: {}", names.join(", "))?;
    }
    Ok(())
}

pub fn render_struggled(
    out: &mut dyn Write,
    habits: &HabitCollection,
    now: DateTime<Utc>,
    window: Duration,
) -> CmdResult {
    let names = habits.struggled(now, window);
    if names.is_empty() {
        writeln!(out, "No struggled habits in the last {} days!", window.num_days())?;
    } else {
        writeln!(
            out,
            "Habits struggled with in the last {} days: {}",
            window.num_days(),
            names.join(", ")
        )?;
    }
    Ok(())
}
