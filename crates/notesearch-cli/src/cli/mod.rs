use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod settings;

#[cfg(test)]
mod tests;

pub use args::{CompleteArgs, SearchArgs, WatchArgs};
pub use settings::{SettingsArgs, SettingsCommand};

#[derive(Debug, Parser)]
#[command(name = "notesearch")]
#[command(about = "Weighted note search and trigger autocomplete", version)]
pub struct Cli {
    /// Folder holding the markdown notes.
    #[arg(long, default_value = ".")]
    pub vault: PathBuf,

    /// Settings file; defaults to `<vault>/.notesearch/settings.toml`.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild the index and report what was read.
    Index,
    Search(SearchArgs),
    /// Run the autocomplete trigger over a line of typed text.
    Complete(CompleteArgs),
    Settings(SettingsArgs),
    /// Rebuild on the configured interval until interrupted.
    Watch(WatchArgs),
}

impl Commands {
    /// Operation name reported in error payloads.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Search(_) => "search",
            Self::Complete(_) => "complete",
            Self::Settings(_) => "settings",
            Self::Watch(_) => "watch",
        }
    }
}
