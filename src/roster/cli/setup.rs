use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use roster::form::FormField;
use roster::index::RowSelector;

/// "0.1.0" for tagged release builds, "0.1.0@abc1234 2024-01-15 14:30"
/// otherwise. Computed by build.rs.
const VERSION: &str = env!("ROSTER_VERSION");

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version = VERSION)]
#[command(about = "Membership roster: list, add, update and delete members", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Connection string (file://<dir> or memory://)
    #[arg(long, global = true, value_name = "URI")]
    pub connection: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all members
    #[command(alias = "ls")]
    List,

    /// Show one member in full
    #[command(alias = "v")]
    Show {
        /// Row number or member id
        row: RowSelector,
    },

    /// Add a new member
    #[command(alias = "n")]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a member: loads the row into the form, applies the given fields, saves
    #[command(alias = "e")]
    Update {
        /// Row number or member id
        row: RowSelector,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a member after confirmation
    #[command(alias = "rm")]
    Delete {
        /// Row number or member id
        row: RowSelector,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive form session
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (connection, database, collection, report-all-errors)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Form inputs settable from the command line. Unset flags leave the
/// corresponding input untouched.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// Five digits, e.g. 00100
    #[arg(long, value_name = "CODE")]
    pub postal_code: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Membership start date (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,
}

impl FieldArgs {
    /// The text inputs that were given, in form order.
    pub fn edits(&self) -> Vec<(FormField, String)> {
        [
            (FormField::FirstName, &self.first_name),
            (FormField::LastName, &self.last_name),
            (FormField::Address, &self.address),
            (FormField::PostalCode, &self.postal_code),
            (FormField::Phone, &self.phone),
            (FormField::Email, &self.email),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}
