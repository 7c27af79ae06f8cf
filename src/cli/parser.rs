use crate::export::ExportFormat;
use crate::models::{DefaultView, Granularity};
use clap::{Parser, Subcommand};

/// Command-line interface definition for tiplogger
/// CLI application to track tips and shifts with SQLite
#[derive(Parser)]
#[command(
    name = "tiplogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track restaurant shifts and tips, and see earnings per day, week, month and year",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user (email) instead of the configured default
    #[arg(global = true, long = "user", value_name = "EMAIL")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print diagnostic logs to stderr (RUST_LOG takes precedence)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage local user profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show or update the active user's preferences
    Prefs {
        #[arg(long, help = "Currency code, e.g. USD, EUR, GBP")]
        currency: Option<String>,

        #[arg(long, help = "IANA timezone name, e.g. America/New_York")]
        timezone: Option<String>,

        #[arg(long = "default-view", value_enum, help = "View opened by `tiplogger view`")]
        default_view: Option<DefaultView>,
    },

    /// Manage workplaces and their positions
    Workplace {
        #[command(subcommand)]
        action: WorkplaceAction,
    },

    /// Record and manage shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Earnings summary and breakdown for a week, month or year
    Dashboard {
        #[arg(long, value_enum, default_value = "month")]
        view: Granularity,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Any day inside the period (default: today)")]
        date: Option<String>,

        #[arg(
            long,
            default_value_t = 0,
            allow_hyphen_values = true,
            help = "Move by N periods (negative = back)"
        )]
        offset: i32,
    },

    /// Month calendar coloured by daily income
    Calendar {
        #[arg(long, value_name = "YYYY-MM", help = "Month to show (default: current month)")]
        month: Option<String>,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },

    /// Shifts and totals of one day
    Day {
        /// Day to show (YYYY-MM-DD)
        date: String,
    },

    /// Open the preferred default view (dashboard or calendar)
    View,

    /// Export shift data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range (start:end)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user with default preferences
    Add {
        email: String,

        #[arg(long, default_value = "")]
        name: String,
    },

    /// List users
    List,

    /// Make a user the default for future commands
    Use { email: String },
}

#[derive(Subcommand)]
pub enum WorkplaceAction {
    /// Add a workplace
    Add {
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        /// Position as TITLE:WAGE (repeatable), e.g. --position Server:7.25
        #[arg(long = "position", value_name = "TITLE:WAGE")]
        positions: Vec<String>,
    },

    /// List workplaces and positions
    List,

    /// Rename or relocate a workplace
    Edit {
        /// Workplace name or id
        workplace: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a workplace (its shifts are kept)
    Del {
        workplace: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Add a position to a workplace
    AddPosition {
        workplace: String,

        title: String,

        #[arg(long, default_value_t = 0.0)]
        wage: f64,
    },

    /// Remove a position from a workplace
    DelPosition {
        workplace: String,

        /// Position title or id
        position: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Record a shift
    Add {
        /// Shift date: YYYY-MM-DD, optionally with HH:MM
        date: String,

        #[arg(long, help = "Workplace name or id")]
        workplace: String,

        #[arg(long, help = "Position title or id")]
        position: String,

        #[arg(long)]
        hours: f64,

        #[arg(long, default_value_t = 0.0)]
        cash: f64,

        #[arg(long, default_value_t = 0.0)]
        card: f64,
    },

    /// Change fields of a shift
    Edit {
        /// Shift id (a unique prefix is enough)
        id: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        workplace: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long)]
        cash: Option<f64>,

        #[arg(long)]
        card: Option<f64>,

        #[arg(long, help = "Override the recorded hourly wage")]
        wage: Option<f64>,
    },

    /// Delete a shift
    Del {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Shift history, newest first
    List {
        #[arg(long, short, help = "Match date, workplace or position")]
        search: Option<String>,

        #[arg(long, help = "Only shifts at this workplace (name or id)")]
        workplace: Option<String>,
    },
}
