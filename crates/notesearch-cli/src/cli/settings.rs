use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print effective settings (file merged over defaults, env applied).
    Show,
    /// Validate and store one value; rejected values keep the old one.
    Set {
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Path,
}
