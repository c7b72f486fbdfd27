//! # Roster CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and turns a failure into an exit status.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/)                                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + per-command handlers (commands.rs)      │
//! │  - Interactive form session (shell.rs)                      │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                     roster::api::RosterApi
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument
//! parsing, prompts, rendering and exit codes.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(failure) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), failure);
        std::process::exit(1);
    }
}
