use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "NOTESEARCH_LOG";

/// Installs a stderr subscriber so JSON on stdout stays machine-readable.
///
/// Priority: `NOTESEARCH_LOG`, then `RUST_LOG`, then `info` (`warn` when
/// `quiet` is set).
pub(crate) fn init(quiet: bool) {
    let filter = build_env_filter(quiet);
    let stderr_is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_tty)
        .with_target(true)
        .without_time()
        .compact();
    // A subscriber installed by an embedding process wins.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn build_env_filter(quiet: bool) -> EnvFilter {
    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directive(quiet))
}

const fn default_directive(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}
