use crate::models::work_log::WorkerKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hrflow
#[derive(Parser)]
#[command(
    name = "hrflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "A CLI for HR Flow: check your calendar, absences and balance, and report hours",
    long_about = None
)]
pub struct Cli {
    /// Use another configuration file instead of ~/.hrflow
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Print debug logs (HRFLOW_LOG overrides)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file
    Init {
        #[arg(long, help = "Portal username")]
        username: Option<String>,

        #[arg(long, help = "Portal password")]
        password: Option<String>,

        #[arg(long, value_enum, help = "Worker type: monthly or hourly")]
        worker: Option<WorkerKind>,

        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration (password masked)")]
        print_config: bool,

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

    /// Print the upcoming days of the work calendar
    Calendar {
        #[arg(long, short, default_value_t = 39, help = "Today + COUNT days to fetch")]
        count: u32,

        #[arg(long, short, help = "Print all dates instead of weekdays only")]
        all: bool,
    },

    /// List absences
    Absences {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// List hours recorded per day
    Hours {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Check your working hours balance
    Balance {
        #[arg(long, short, default_value_t = 30, help = "How many MONTHS to check backwards")]
        months: u32,
    },

    /// Add a new hour report
    Report {
        #[arg(
            long,
            short,
            default_value = "8h",
            help = "Duration to report, e.g. 8h30m. Ignored if --start is set"
        )]
        duration: String,

        #[arg(long, short, value_name = "HH:MM", help = "Workday start (default: end - duration)")]
        start: Option<String>,

        #[arg(long, short, value_name = "HH:MM", help = "Workday end (default: now)")]
        end: Option<String>,

        #[arg(long, value_name = "d.M.", help = "Date of the report, current year (default: today)")]
        date: Option<String>,

        #[arg(long, short, help = "Project to assign to the report")]
        project: Option<String>,

        #[arg(long, short, default_value = "", help = "Comment for the report")]
        comment: String,

        #[arg(long, help = "Report as an hourly worker (no lunch in the duration)")]
        hourly: bool,

        #[arg(long = "no-lunch", help = "Don't deduct the lunch break")]
        no_lunch: bool,
    },
}
