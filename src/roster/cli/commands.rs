use super::logging;
use super::render::{
    error_text, print_messages, render_config, render_member, render_member_table,
};
use super::setup::{Cli, Commands, FieldArgs};
use super::shell;
use clap::Parser;
use roster::api::RosterApi;
use roster::config::RosterConfig;
use roster::error::{Result, RosterError};
use roster::index::RowSelector;
use roster::init::{initialize, resolve_store_config, RosterPaths, RosterContext};
use roster::store::Collection;
use std::fmt;
use std::io::{self, BufRead, Write};

/// An error on its way to the terminal, with the display preference that
/// was in effect when it happened.
#[derive(Debug)]
pub struct Failure {
    pub error: RosterError,
    pub report_all: bool,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&error_text(&self.error, self.report_all))
    }
}

impl From<RosterError> for Failure {
    fn from(error: RosterError) -> Self {
        Self {
            error,
            report_all: false,
        }
    }
}

pub fn run() -> std::result::Result<(), Failure> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Config edits must work even when the configured connection is broken.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(cli.connection.as_deref(), key.as_deref(), value.as_deref())
            .map_err(Failure::from);
    }

    if let Some(Commands::Shell) = &cli.command {
        return shell::run(cli.connection.as_deref()).map_err(Failure::from);
    }

    let mut ctx = initialize(cli.connection.as_deref())?;
    let report_all = ctx.config.report_all_errors;

    let outcome = match cli.command {
        None | Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Show { row }) => handle_show(&ctx, &row),
        Some(Commands::Add { fields }) => handle_add(&mut ctx.api, &fields),
        Some(Commands::Update { row, fields }) => handle_update(&mut ctx.api, &row, &fields),
        Some(Commands::Delete { row, yes }) => handle_delete(&mut ctx.api, &row, yes),
        Some(Commands::Shell) | Some(Commands::Config { .. }) => Ok(()),
    };

    outcome.map_err(|error| Failure { error, report_all })
}

fn handle_list(ctx: &RosterContext) -> Result<()> {
    print!("{}", render_member_table(&ctx.api.view().rows()));
    Ok(())
}

fn handle_show(ctx: &RosterContext, row: &RowSelector) -> Result<()> {
    let member = ctx
        .api
        .view()
        .find(row)
        .ok_or_else(|| RosterError::RowNotFound(row.to_string()))?;
    print!("{}", render_member(member));
    Ok(())
}

fn apply_fields(api: &mut RosterApi<Collection>, fields: &FieldArgs) -> Result<()> {
    for (field, value) in fields.edits() {
        api.edit(field, value)?;
    }
    if let Some(start) = fields.start {
        api.set_start(Some(start))?;
    }
    Ok(())
}

fn handle_add(api: &mut RosterApi<Collection>, fields: &FieldArgs) -> Result<()> {
    apply_fields(api, fields)?;
    let result = api.add()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    api: &mut RosterApi<Collection>,
    row: &RowSelector,
    fields: &FieldArgs,
) -> Result<()> {
    api.select(row)?;
    apply_fields(api, fields)?;
    let result = api.update()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut RosterApi<Collection>, row: &RowSelector, yes: bool) -> Result<()> {
    api.select(row)?;
    let result = api.delete()?;
    print_messages(&result.messages);

    let Some(request) = result.pending_delete else {
        return Ok(());
    };

    let confirmed = if yes {
        true
    } else {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        ask_yes_no(&mut input, "Delete the selected member?")?
    };

    let result = api.confirm_delete(request, confirmed)?;
    if !confirmed {
        println!("Aborted.");
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(flag: Option<&str>, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let paths = RosterPaths::resolve()?;
    let mut config = RosterConfig::load(&paths.config_dir)?;

    match (key, value) {
        (None, _) => {
            let effective = resolve_store_config(&config, &paths, flag);
            print!("{}", render_config(&config, &effective.connection));
        }
        (Some(key), None) => println!("{}", config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(&paths.config_dir)?;
            println!("{} = {}", key, config.get(key)?);
        }
    }
    Ok(())
}

/// Print `prompt` and read one answer. Only "y" or "yes" count as yes; end
/// of input counts as no.
pub(super) fn ask_yes_no<R: BufRead>(input: &mut R, prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
