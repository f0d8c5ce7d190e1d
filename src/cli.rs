use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "timeblock",
    about = "Turn dated reminders into time-blocked daily task notes",
    version
)]
pub struct Cli {
    /// Root directory of the notes vault
    #[arg(long, env = "TIMEBLOCK_VAULT", global = true, default_value = ".")]
    pub vault: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct Folders {
    /// Folder to scan for reminders, relative to the vault (prompted if omitted)
    #[arg(short, long, env = "TIMEBLOCK_SOURCE")]
    pub source: Option<String>,
    /// Folder holding the daily task notes, relative to the vault (prompted if omitted)
    #[arg(short, long, env = "TIMEBLOCK_OUTPUT")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sync reminders into daily task notes once
    Sync {
        #[command(flatten)]
        folders: Folders,
        /// Report what would change without touching any file
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sync, then sync again whenever the source folder changes
    Watch {
        #[command(flatten)]
        folders: Folders,
        /// Quiet period after a change before syncing, in milliseconds
        #[arg(long, default_value = "300")]
        debounce: u64,
    },

    /// Show how lines would be converted
    Parse {
        /// Lines to parse (omit to read from stdin)
        lines: Vec<String>,
    },
}
