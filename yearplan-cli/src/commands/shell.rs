//! Interactive session: open a day and edit it, with saves running in the
//! background while the prompt stays responsive.

use std::io::Write;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use yearplan_core::{DateKey, EventId, InitialStatus};

use super::{load, new_session, parse_date};
use crate::render::{render_day, render_heatmap};
use crate::session::Session;
use crate::sync::LoadOutcome;

const HELP: &str = "\
open <date>      open a day (YYYY-MM-DD or today)
close            close the open day
todo <text>      add a todo to the open day
done <text>      add a finished event to the open day
toggle <id>      done <-> todo, or restore a given-up event
delete <id>      give up, or delete for good if already given up
glyph [glyph]    set or clear the open day's glyph
show             show the open day
heatmap          show the year
reload           load everything from the server again
quit             leave";

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Open(DateKey),
    Close,
    Add(InitialStatus, String),
    Toggle(EventId),
    Delete(EventId),
    Glyph(String),
    Show,
    Heatmap,
    Reload,
    Help,
    Quit,
    Nothing,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let id = || {
            if rest.is_empty() {
                Err(format!("Usage: {word} <id>"))
            } else {
                Ok(EventId::parse(rest))
            }
        };

        match word {
            "" => Ok(ShellCommand::Nothing),
            "open" => parse_date(rest).map(ShellCommand::Open),
            "close" => Ok(ShellCommand::Close),
            "todo" => Ok(ShellCommand::Add(InitialStatus::Todo, rest.to_string())),
            "done" => Ok(ShellCommand::Add(InitialStatus::Done, rest.to_string())),
            "toggle" => id().map(ShellCommand::Toggle),
            "delete" => id().map(ShellCommand::Delete),
            "glyph" => Ok(ShellCommand::Glyph(rest.to_string())),
            "show" => Ok(ShellCommand::Show),
            "heatmap" => Ok(ShellCommand::Heatmap),
            "reload" => Ok(ShellCommand::Reload),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command '{other}', try `help`")),
        }
    }
}

pub async fn run() -> Result<()> {
    let mut session = new_session()?;
    if !unlock_and_load(&mut session).await? {
        return Ok(());
    }

    println!("{}", render_heatmap(&session, DateKey::today()));
    println!("\n{}", "Type `help` for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(&mut session, command).await?,
            Err(message) => eprintln!("{}", message.red()),
        }
    }

    session.drain().await;
    Ok(())
}

/// Load, asking for the password while the client is locked or the password
/// is rejected. Returns false if the user gives up by entering nothing.
async fn unlock_and_load(session: &mut Session) -> Result<bool> {
    let mut question = "Password: ";

    loop {
        match load(session).await {
            LoadOutcome::Loaded { .. } => return Ok(true),
            LoadOutcome::Failed => {
                let message = "Could not reach the server, edits will still be saved when possible";
                eprintln!("{}", message.yellow());
                return Ok(true);
            }
            LoadOutcome::Locked => {}
            LoadOutcome::AuthorizationRequired => question = "Wrong password, try again: ",
        }

        let password = rpassword::prompt_password(question).context("Failed to read password")?;
        if !session.unlock(&password)? {
            return Ok(false);
        }
    }
}

fn prompt(session: &Session) -> Result<()> {
    match session.active() {
        Some(date) => print!("{} {}> ", "yearplan".bold(), date),
        None => print!("{}> ", "yearplan".bold()),
    }
    std::io::stdout().flush()?;
    Ok(())
}

async fn execute(session: &mut Session, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::Open(date) => session.open(date),
        ShellCommand::Close => {
            session.close();
            return Ok(());
        }
        ShellCommand::Add(status, text) => {
            session.add_event(&text, status);
        }
        ShellCommand::Toggle(id) => {
            session.primary(&id);
        }
        ShellCommand::Delete(id) => {
            session.delete(&id);
        }
        ShellCommand::Glyph(glyph) => {
            session.set_glyph(&glyph);
        }
        ShellCommand::Show => {}
        ShellCommand::Heatmap => {
            println!("{}", render_heatmap(session, DateKey::today()));
            return Ok(());
        }
        ShellCommand::Reload => {
            if !unlock_and_load(session).await? {
                println!("{}", "Still locked.".yellow());
            }
        }
        ShellCommand::Help => {
            println!("{HELP}");
            return Ok(());
        }
        ShellCommand::Quit | ShellCommand::Nothing => return Ok(()),
    }

    if let Some(date) = session.active() {
        println!("{}", render_day(&date, session.events(&date)));
    }
    Ok(())
}
