//! # CLI Behavior
//!
//! This is **one possible UI client** for roster. It is the only place that
//! knows about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution (`roster`)
//!
//! Running `roster` with no arguments lists the members.
//!
//! ## One-Shot Commands
//!
//! `add`, `update` and `delete` each drive the same form session the shell
//! uses, in a single step:
//!
//! - `roster update 2 --last-name Virtanen` selects row 2 (which loads it into
//!   the form), applies the given edits on top and submits.
//! - `roster delete 2` selects row 2 and asks "Delete the selected member?"
//!   before anything is removed. `--yes` answers for you.
//!
//! ## Interactive Shell (`roster shell`)
//!
//! Exposes the form directly: select a row, set fields, submit. The session
//! survives errors; a validation failure just prints the message and leaves
//! the form as it was.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `logging`: tracing subscriber setup
//! - `render`: tables, forms, messages
//! - `setup`: argument parsing via clap
//! - `shell`: the interactive session

mod commands;
mod logging;
mod render;
mod setup;
mod shell;

pub use commands::run;
