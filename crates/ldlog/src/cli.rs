//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use ldlog_core::constants::ROOT_ENV;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ldlog")]
#[command(version, about = "View and clear a debug log with timestamps in local time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site root holding logs/ and the settings file (default: ~/.ldlog)
    #[arg(long, env = ROOT_ENV, global = true)]
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the log with local-time tags
    Show(ShowArgs),

    /// Clear the log file
    Clear(ClearArgs),

    /// Check whether a path may be cleared
    Validate {
        /// Candidate log file path
        path: String,
    },

    /// Show the resolved timezone and current local time
    Timezone,

    /// Append a message to the log
    Write(WriteArgs),

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Args)]
pub struct ShowArgs {
    /// Only show lines matching this regex
    #[arg(long)]
    pub grep: Option<String>,

    /// Newest entries first
    #[arg(long, conflicts_with = "oldest")]
    pub newest: bool,

    /// Oldest entries first
    #[arg(long)]
    pub oldest: bool,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Log file to clear (must live in the logs directory)
    #[arg(long)]
    pub path: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct WriteArgs {
    /// Message to append
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Write even when capture is disabled
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,

    /// Update settings
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub struct SettingsSetArgs {
    /// Timezone name such as Asia/Tokyo (empty string clears it)
    #[arg(long)]
    pub timezone: Option<String>,

    /// UTC offset in hours, used when no timezone name is set
    #[arg(long, allow_hyphen_values = true)]
    pub gmt_offset: Option<f64>,

    /// Capture log output even when debug is off
    #[arg(long)]
    pub force_capture: Option<bool>,

    /// Display order: oldest or newest
    #[arg(long)]
    pub order: Option<String>,

    /// Debug mode
    #[arg(long)]
    pub debug: Option<bool>,
}
