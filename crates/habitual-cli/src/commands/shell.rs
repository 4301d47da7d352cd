//! Interactive numbered menu.
//!
//! One [`Session`] lives for as long as the user stays logged in; every
//! change is saved as it happens and again on logout or quit.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use habitual_core::{JsonHabitStore, Periodicity, Session};

use super::analyze::{render_longest, render_periodicity, render_struggled};
use super::habit::render_list;
use super::{CmdResult, Context};

const MENU: &str = "
Habitual
  1. Register
  2. Login
  3. Load predefined habits
  4. Add habit
  5. Check off habit
  6. Longest streak
  7. Daily habits
  8. Weekly habits
  9. Struggled habits
 10. View all habits
 11. Delete habit
 12. Logout
  q. Quit
";

pub fn run(ctx: &Context) -> CmdResult {
    let stdin = io::stdin();
    let mut shell = Shell::new(ctx, stdin.lock(), io::stdout());
    shell.run()
}

pub struct Shell<'a, R, W> {
    ctx: &'a Context,
    input: R,
    out: W,
    session: Option<Session<JsonHabitStore>>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ctx: &'a Context, input: R, out: W) -> Self {
        Self {
            ctx,
            input,
            out,
            session: None,
        }
    }

    pub fn run(&mut self) -> CmdResult {
        loop {
            write!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => self.seed()?,
                "4" => self.add_habit()?,
                "5" => self.check_off()?,
                "6" => self.query("see your longest streak", Query::Longest)?,
                "7" => self.query("check your daily habits", Query::Daily)?,
                "8" => self.query("check your weekly habits", Query::Weekly)?,
                "9" => self.query("check your struggled habits", Query::Struggled)?,
                "10" => self.query("view all your habits", Query::All)?,
                "11" => self.delete_habit()?,
                "12" => self.logout()?,
                "q" | "Q" => break,
                _ => writeln!(self.out, "Invalid choice. Try again.")?,
            }
        }

        if let Some(session) = self.session.take() {
            session.logout()?;
        }
        writeln!(self.out, "Exiting Habitual ... Goodbye!")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn logged_in(&mut self, action: &str) -> io::Result<bool> {
        if self.session.is_some() {
            return Ok(true);
        }
        writeln!(self.out, "Please login to {action}.")?;
        Ok(false)
    }

    fn register(&mut self) -> CmdResult {
        let username = self.prompt("Enter username: ")?.unwrap_or_default();
        let password = self.prompt("Enter password: ")?.unwrap_or_default();
        let outcome = Session::register(
            &self.ctx.credential_store(),
            &self.ctx.habit_store(),
            &username,
            &password,
        )?;
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }

    fn login(&mut self) -> CmdResult {
        let username = self.prompt("Enter username: ")?.unwrap_or_default();
        let password = self.prompt("Enter password: ")?.unwrap_or_default();

        if let Some(previous) = self.session.take() {
            previous.save()?;
        }
        match Session::login(
            &self.ctx.credential_store(),
            self.ctx.habit_store(),
            &username,
            &password,
        ) {
            Ok(session) => {
                writeln!(self.out, "Welcome, {username}!")?;
                if let Some(warning) = session.load_warning() {
                    writeln!(self.out, "{warning}; starting with no habits.")?;
                }
                self.session = Some(session);
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    fn seed(&mut self) -> CmdResult {
        if !self.logged_in("load predefined habits")? {
            return Ok(());
        }
        let weeks = self.ctx.config.tracking.seed_weeks;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let outcome = session.seed(Utc::now(), weeks)?;
        writeln!(self.out, "{outcome}")?;
        render_list(&mut self.out, session.habits(), Utc::now())
    }

    fn add_habit(&mut self) -> CmdResult {
        if !self.logged_in("add a habit")? {
            return Ok(());
        }
        let name = self.prompt("Enter habit name: ")?.unwrap_or_default();
        let periodicity = self
            .prompt("Enter periodicity (daily/weekly): ")?
            .unwrap_or_default();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let outcome = session.add_habit(&name, &periodicity, Utc::now())?;
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }

    fn check_off(&mut self) -> CmdResult {
        if !self.logged_in("check off a habit")? {
            return Ok(());
        }
        let name = self.prompt("Enter habit name to check off: ")?.unwrap_or_default();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let outcome = session.check_off(&name, Utc::now())?;
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }

    fn delete_habit(&mut self) -> CmdResult {
        if !self.logged_in("delete a habit")? {
            return Ok(());
        }
        let name = self.prompt("Enter habit name to delete: ")?.unwrap_or_default();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let outcome = session.delete_habit(&name)?;
        writeln!(self.out, "{outcome}")?;
        Ok(())
    }

    fn query(&mut self, action: &str, query: Query) -> CmdResult {
        if !self.logged_in(action)? {
            return Ok(());
        }
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let habits = session.habits();
        let now = Utc::now();
        match query {
            Query::Longest => render_longest(&mut self.out, habits),
            Query::Daily => render_periodicity(&mut self.out, habits, Periodicity::Daily),
            Query::Weekly => render_periodicity(&mut self.out, habits, Periodicity::Weekly),
            Query::Struggled => render_struggled(&mut self.out, habits, now, self.ctx.config.lookback()),
            Query::All => render_list(&mut self.out, habits, now),
        }
    }

    fn logout(&mut self) -> CmdResult {
        match self.session.take() {
            Some(session) => {
                let outcome = session.logout()?;
                writeln!(self.out, "{outcome}")?;
            }
            None => writeln!(self.out, "No user is currently logged in.")?,
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Query {
    Longest,
    Daily,
    Weekly,
    Struggled,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Credentials;
    use habitual_core::HabitStore;

    fn run_script(dir: &tempfile::TempDir, script: &str) -> String {
        let ctx = Context::in_dir(dir.path().to_path_buf(), Credentials::default()).unwrap();
        let mut out = Vec::new();
        Shell::new(&ctx, script.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_menu_walkthrough() {
        let dir = tempfile::tempdir().unwrap();
        let text = run_script(
            &dir,
            "4\n1\nalice\npw\n2\nalice\npw\n4\nRun\ndaily\n4\nSwim\nhourly\n5\nRun\n5\nRun\n6\n7\n10\n12\nq\n",
        );

        assert!(text.contains("Please login to add a habit."));
        assert!(text.contains("User 'alice' registered successfully."));
        assert!(text.contains("Welcome, alice!"));
        assert!(text.contains("Added habit: Run with periodicity: daily."));
        assert!(text.contains("Invalid periodicity 'hourly'"));
        assert!(text.contains("Habit 'Run' checked off at"));
        assert!(text.contains("Habit 'Run' is already checked off for the current day."));
        assert!(text.contains("Longest streak: 1 periods."));
        assert!(text.contains("Current daily habits: Run"));
        assert!(text.contains(" - Run (daily), Streak: 1"));
        assert!(text.contains("User 'alice' logged out."));
        assert!(text.ends_with("Exiting Habitual ... Goodbye!\n"));

        let saved = habitual_core::JsonHabitStore::new(dir.path()).load("alice").unwrap();
        assert_eq!(saved.get("Run").unwrap().completions().len(), 1);
    }

    #[test]
    fn login_errors_and_eof() {
        let dir = tempfile::tempdir().unwrap();
        let text = run_script(&dir, "2\nghost\npw\n1\nbob\npw\n2\nbob\nbad\n12\n99\n");

        assert!(text.contains("User 'ghost' does not exist. Please register first."));
        assert!(text.contains("Incorrect password."));
        assert!(text.contains("No user is currently logged in."));
        assert!(text.contains("Invalid choice. Try again."));
        assert!(text.ends_with("Exiting Habitual ... Goodbye!\n"));
    }

    #[test]
    fn seed_then_quit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let text = run_script(&dir, "1\ncarol\npw\n2\ncarol\npw\n3\n11\nShopping\n9\nq\n");

        assert!(text.contains("Predefined habits with example tracking data loaded successfully."));
        assert!(text.contains(" - Exercise (daily), Streak: 28"));
        assert!(text.contains("Habit 'Shopping' has been deleted."));
        assert!(text.contains("No struggled habits in the last 30 days!"));

        let saved = habitual_core::JsonHabitStore::new(dir.path()).load("carol").unwrap();
        assert_eq!(saved.len(), 4);
        assert!(!saved.contains("Shopping"));
    }
}
