use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use notesearch_core::NoteSearchError;
use notesearch_core::error::ErrorPayload;
use notesearch_core::search::SearchFields;

use crate::cli::SearchArgs;

const SETTINGS_DIR: &str = ".notesearch";
const SETTINGS_FILE: &str = "settings.toml";
const CLI_ERROR_CODE: &str = "CLI_ERROR";

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn resolve_settings_path(vault: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(
        || vault.join(SETTINGS_DIR).join(SETTINGS_FILE),
        Path::to_path_buf,
    )
}

pub(super) const fn search_fields(args: &SearchArgs) -> SearchFields {
    SearchFields {
        file_name: !args.no_file_name,
        directory: !args.no_directory,
        tags: !args.no_tags,
        headings: !args.no_headings,
        content: !args.no_content,
        quotes: !args.no_quotes,
    }
}

/// Builds the stderr payload for a failed command. Core errors keep their
/// stable code; the message carries the whole context chain.
pub(super) fn error_payload(err: &anyhow::Error, operation: &str, vault: &Path) -> ErrorPayload {
    let path = Some(vault.display().to_string());
    let mut payload = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<NoteSearchError>())
        .map_or_else(
            || ErrorPayload {
                code: CLI_ERROR_CODE.to_string(),
                message: String::new(),
                operation: operation.to_string(),
                path: path.clone(),
            },
            |core| core.to_payload(operation, path.clone()),
        );
    payload.message = format!("{err:#}");
    payload
}
