use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use notesearch_core::editor::TextBuffer;
use notesearch_core::search::SearchResult;
use notesearch_core::{LocalVault, NoteSearch, NoteSearchError, SettingsFile};
use serde::Serialize;
use tracing::info;

use crate::cli::{CompleteArgs, Commands, SearchArgs, SettingsCommand, WatchArgs};

mod support;

#[cfg(test)]
mod tests;

use self::support::{error_payload, print_json, resolve_settings_path, search_fields};

/// Writes the failure as one JSON line on stderr.
pub(crate) fn report_failure(err: &anyhow::Error, operation: &str, vault: &Path) {
    let payload = error_payload(err, operation, vault);
    match serde_json::to_string(&payload) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!("{err:#}"),
    }
}

pub(crate) fn run(vault: &Path, settings_path: Option<&Path>, command: Commands) -> Result<()> {
    let file = SettingsFile::new(resolve_settings_path(vault, settings_path));
    match command {
        Commands::Settings(args) => run_settings(&file, args.command),
        Commands::Index => {
            let mut app = open_vault(vault, &file)?;
            let report = app.rebuild_index().context("failed to rebuild index")?;
            print_json(&report)
        }
        Commands::Search(args) => {
            let mut app = open_vault(vault, &file)?;
            app.rebuild_index().context("failed to rebuild index")?;
            run_search(&app, &args)
        }
        Commands::Complete(args) => run_complete(&mut open_vault(vault, &file)?, &args),
        Commands::Watch(args) => run_watch(&mut open_vault(vault, &file)?, &args),
    }
}

fn open_vault(vault: &Path, file: &SettingsFile) -> Result<NoteSearch<LocalVault>> {
    let settings = file
        .load()
        .with_context(|| format!("failed to load settings from {}", file.path().display()))?
        .with_env_overrides();
    if !vault.is_dir() {
        return Err(NoteSearchError::NotFound(vault.display().to_string()))
            .context("vault folder not found");
    }
    Ok(NoteSearch::new(LocalVault::new(vault), settings))
}

fn run_settings(file: &SettingsFile, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = file.load()?.with_env_overrides();
            print_json(&settings)?;
        }
        SettingsCommand::Set { key, value } => {
            let mut settings = file.load()?;
            let applied = file
                .update(&mut settings, &key, &value)
                .with_context(|| format!("failed to update setting {key}"))?;
            print_json(&serde_json::json!({
                "key": key,
                "applied": applied,
                "settings": settings,
            }))?;
        }
        SettingsCommand::Path => {
            println!("{}", file.path().display());
        }
    }
    Ok(())
}

fn run_search(app: &NoteSearch<LocalVault>, args: &SearchArgs) -> Result<()> {
    let mut results = app.search(&args.query, search_fields(args));
    if let Some(target) = args.open {
        let Some(result) = results.get(target) else {
            bail!("no result at index {target} ({} results)", results.len());
        };
        return print_json(&result.open_target());
    }
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }
    if args.summary {
        let summaries = results.iter().map(SearchResult::summary).collect::<Vec<_>>();
        return print_json(&summaries);
    }
    print_json(&results)
}

#[derive(Debug, Serialize)]
struct CompleteOutput<'a> {
    trigger: Option<&'a notesearch_core::complete::TriggerEvent>,
    selected_index: Option<usize>,
    suggestions: &'a [notesearch_core::complete::Suggestion],
}

fn run_complete(app: &mut NoteSearch<LocalVault>, args: &CompleteArgs) -> Result<()> {
    let mut buffer = TextBuffer::new(&args.text);
    if !app.autocomplete(&buffer) {
        info!(text = %args.text, "no suggestions");
    }
    step_selection(app, args.step);

    if args.confirm {
        let confirmation = app.confirm(&mut buffer)?;
        return print_json(&serde_json::json!({
            "text": buffer.text(),
            "confirmation": confirmation,
        }));
    }
    let session = app.session();
    print_json(&CompleteOutput {
        trigger: session.trigger(),
        selected_index: session.selected_index(),
        suggestions: session.suggestions(),
    })
}

fn step_selection(app: &mut NoteSearch<LocalVault>, step: i64) {
    let session = app.session_mut();
    for _ in 0..step.unsigned_abs() {
        if step > 0 {
            session.select_next();
        } else {
            session.select_previous();
        }
    }
}

fn run_watch(app: &mut NoteSearch<LocalVault>, args: &WatchArgs) -> Result<()> {
    let schedule = app.reindex_schedule();
    let Some(interval) = schedule.interval() else {
        bail!("automatic reindexing is disabled (autoReindex=false)");
    };
    info!(
        interval_secs = interval.num_seconds(),
        poll_secs = args.poll_secs,
        "watching vault"
    );

    let mut cycles = 0u64;
    loop {
        if let Some(report) = app.reindex_if_due(Utc::now())? {
            print_json(&report)?;
        }
        cycles += 1;
        if args.max_cycles.is_some_and(|max| cycles >= max) {
            return Ok(());
        }
        thread::sleep(Duration::from_secs(args.poll_secs));
    }
}
