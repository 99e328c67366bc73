use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long, default_value_t = false)]
    pub no_file_name: bool,
    #[arg(long, default_value_t = false)]
    pub no_directory: bool,
    #[arg(long, default_value_t = false)]
    pub no_tags: bool,
    #[arg(long, default_value_t = false)]
    pub no_headings: bool,
    #[arg(long, default_value_t = false)]
    pub no_content: bool,
    #[arg(long, default_value_t = false)]
    pub no_quotes: bool,
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print label lines (at most three matches each) instead of raw matches.
    #[arg(long, default_value_t = false)]
    pub summary: bool,
    /// Print where the Nth result (0-based) would open.
    #[arg(long, value_name = "INDEX")]
    pub open: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Text before the cursor, e.g. `see @@# install`.
    #[arg(allow_hyphen_values = true)]
    pub text: String,
    /// Move the selection this many steps forward (negative for backward).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub step: i64,
    /// Insert the selected suggestion and print the resulting text.
    #[arg(long, default_value_t = false)]
    pub confirm: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between due-checks.
    #[arg(long, default_value_t = 30)]
    pub poll_secs: u64,
    /// Stop after this many checks.
    #[arg(long)]
    pub max_cycles: Option<u64>,
}
