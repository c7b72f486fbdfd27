//! # Interactive Shell
//!
//! A line-oriented stand-in for the form window. Each line is one user
//! gesture: clicking a row, typing into a field, pressing a button.
//!
//! ```text
//! roster> select 2
//! roster> set last-name Virtanen
//! roster> update
//! ```
//!
//! Errors are printed and the session carries on with its state untouched.
//! If the store cannot be opened at all, the failure is reported once and
//! the shell keeps running, but only `help` and `quit` do anything.

use super::commands::ask_yes_no;
use super::render::{error_text, print_messages, render_form, render_member_table};
use chrono::NaiveDate;
use colored::Colorize;
use roster::api::{ActionKind, RosterApi};
use roster::error::Result;
use roster::form::FormField;
use roster::index::RowSelector;
use roster::init::initialize;
use roster::store::MemberStore;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const PROMPT: &str = "roster> ";

const HELP: &str = "\
Commands:
  list                    Show all members
  select <ROW>            Load a row into the form
  set <FIELD> [VALUE]     Type into a field (first-name, last-name, address,
                          postal-code, phone, email); no value clears it
  start <YYYY-MM-DD|none> Set the membership start date
  form                    Show the form
  add                     Save the form as a new member
  update                  Save the form over the selected member
  delete                  Delete the selected member
  clear                   Empty the form and drop the selection
  help                    Show this help
  quit                    Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Select(RowSelector),
    Set(FormField, String),
    Start(Option<NaiveDate>),
    Form,
    Add,
    Update,
    Delete,
    Clear,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            "start" => match rest.to_lowercase().as_str() {
                "" => return Err("Usage: start <YYYY-MM-DD|none>".to_string()),
                "none" | "today" => ShellCommand::Start(None),
                date => ShellCommand::Start(Some(
                    NaiveDate::parse_from_str(date, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date: {} (expected YYYY-MM-DD)", rest))?,
                )),
            },
            "form" | "show" => ShellCommand::Form,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                let kind = other
                    .parse::<ActionKind>()
                    .map_err(|_| format!("Unknown command: {} (try 'help')", other))?;
                action_command(kind, rest)?
            }
        };
        Ok(command)
    }
}

/// Form actions, spelled the way `ActionKind` names them.
fn action_command(kind: ActionKind, rest: &str) -> std::result::Result<ShellCommand, String> {
    let command = match kind {
        ActionKind::Select => {
            if rest.is_empty() {
                return Err("Usage: select <ROW>".to_string());
            }
            ShellCommand::Select(rest.parse()?)
        }
        ActionKind::Edit => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("Usage: set <FIELD> [VALUE]".to_string());
            }
            ShellCommand::Set(field.parse()?, value.to_string())
        }
        ActionKind::Add => ShellCommand::Add,
        ActionKind::Update => ShellCommand::Update,
        ActionKind::Delete => ShellCommand::Delete,
        ActionKind::Clear => ShellCommand::Clear,
    };
    Ok(command)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(connection_flag: Option<&str>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match initialize(connection_flag) {
        Ok(mut ctx) => {
            print!("{}", render_member_table(&ctx.api.view().rows()));
            session(&mut ctx.api, &mut input, ctx.config.report_all_errors)
        }
        Err(e) if e.is_fatal() => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            disconnected(&mut input)
        }
        Err(e) => Err(e),
    }
}

fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    print!("{}", PROMPT);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line))
}

fn session<S: MemberStore, R: BufRead>(
    api: &mut RosterApi<S>,
    input: &mut R,
    report_all: bool,
) -> Result<()> {
    while let Some(line) = read_command(input)? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg.red());
                continue;
            }
        };
        match execute(api, command, input) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::debug!(error = ?e, "shell command failed");
                eprintln!("{} {}", "Error:".red().bold(), error_text(&e, report_all));
            }
        }
    }
    Ok(())
}

fn disconnected<R: BufRead>(input: &mut R) -> Result<()> {
    while let Some(line) = read_command(input)? {
        match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => println!("{}", HELP),
            _ if line.trim().is_empty() => {}
            _ => eprintln!("{}", "Not connected.".red()),
        }
    }
    Ok(())
}

fn execute<S: MemberStore, R: BufRead>(
    api: &mut RosterApi<S>,
    command: ShellCommand,
    input: &mut R,
) -> Result<Flow> {
    match command {
        ShellCommand::List => print!("{}", render_member_table(&api.view().rows())),
        ShellCommand::Select(row) => {
            api.select(&row)?;
            print!("{}", render_form(api.form()));
        }
        ShellCommand::Set(field, value) => {
            api.edit(field, value)?;
        }
        ShellCommand::Start(date) => {
            api.set_start(date)?;
        }
        ShellCommand::Form => print!("{}", render_form(api.form())),
        ShellCommand::Add => {
            let result = api.add()?;
            print_messages(&result.messages);
            print!("{}", render_member_table(&api.view().rows()));
        }
        ShellCommand::Update => {
            let result = api.update()?;
            print_messages(&result.messages);
            print!("{}", render_member_table(&api.view().rows()));
        }
        ShellCommand::Delete => {
            let result = api.delete()?;
            print_messages(&result.messages);
            if let Some(request) = result.pending_delete {
                let confirmed = ask_yes_no(input, "Delete the selected member?")?;
                let result = api.confirm_delete(request, confirmed)?;
                print_messages(&result.messages);
                if confirmed {
                    print!("{}", render_member_table(&api.view().rows()));
                }
            }
        }
        ShellCommand::Clear => {
            api.clear()?;
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
