//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for read commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Formatted console output
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for duma-register
#[derive(Parser, Debug)]
#[command(name = "duma")]
#[command(author, version, about = "Legislative register for the chamber - bills, roll-calls, roster, agendas")]
#[command(long_about = r#"
duma-register presents the chamber's legislative record and, for signed-in
administrators, edits it: bills with their roll-call votes, the roster of
representatives, leadership assignments, and order-of-business agendas.

Reads work with an anonymous session. Writes happen in the interactive admin
shell (`duma admin`), which signs in with the configured credentials and keeps
a scoped, expiring session for the duration.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./duma.toml         Project-level config
3. ~/.config/duma-register/config.toml   Global config

Example:
  duma bills --search budget
  duma bill bill-1718000000000
  duma reps --party "United Russia"
  duma admin
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Use the in-memory store instead of the hosted backend
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bills in the legislative-activity view
    Bills {
        /// Title substring to search for (reveals terminal statuses)
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by bill type
        #[arg(short, long)]
        kind: Option<String>,
        /// Filter by introduction date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Filter by sponsor (honorific-insensitive)
        #[arg(long)]
        sponsor: Option<String>,
    },

    /// Show one bill with its full roll-call
    Bill {
        /// Bill id
        id: String,
    },

    /// List the representative directory
    Reps {
        /// Name substring to search for
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by party label
        #[arg(short, long)]
        party: Option<String>,
        /// Filter by region label
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Show the chamber's leadership
    Leadership,

    /// Show upcoming order-of-business agendas
    Agenda,

    /// Start the interactive admin shell
    Admin {
        /// Admin username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Admin password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Rewrite legacy name-keyed vote and leadership records to id-keyed form
    Migrate {
        /// Admin username
        #[arg(short, long)]
        username: String,
        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}
