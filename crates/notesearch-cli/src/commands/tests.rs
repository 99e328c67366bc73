use std::fs;

use notesearch_core::Settings;
use tempfile::tempdir;

use super::support::{error_payload, resolve_settings_path, search_fields};
use super::*;
use crate::cli::{SettingsArgs, WatchArgs};

fn search_args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        no_file_name: false,
        no_directory: false,
        no_tags: false,
        no_headings: false,
        no_content: false,
        no_quotes: false,
        limit: None,
        summary: false,
        open: None,
    }
}

#[test]
fn settings_path_defaults_inside_the_vault() {
    let vault = Path::new("/tmp/vault");
    assert_eq!(
        resolve_settings_path(vault, None),
        vault.join(".notesearch").join("settings.toml")
    );
    let explicit = Path::new("/etc/notesearch.toml");
    assert_eq!(resolve_settings_path(vault, Some(explicit)), explicit);
}

#[test]
fn disabled_flags_turn_fields_off() {
    let mut args = search_args("x");
    args.no_headings = true;
    let fields = search_fields(&args);
    assert!(!fields.headings);
    assert!(fields.content && fields.quotes && fields.file_name);
}

#[test]
fn settings_set_persists_valid_values_only() {
    let vault = tempdir().expect("tempdir");
    let set = |key: &str, value: &str| {
        run(
            vault.path(),
            None,
            Commands::Settings(SettingsArgs {
                command: SettingsCommand::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            }),
        )
    };
    set("quoteWeight", "6").expect("valid value");
    set("quoteWeight", "0").expect("rejected value is not an error");
    assert!(set("noSuchKey", "1").is_err());

    let stored = SettingsFile::new(resolve_settings_path(vault.path(), None))
        .load()
        .expect("load");
    assert_eq!(stored.quote_weight, 6);
    assert_eq!(stored.content_weight, Settings::default().content_weight);
}

#[test]
fn commands_fail_for_a_missing_vault() {
    let root = tempdir().expect("tempdir");
    let missing = root.path().join("absent");
    assert!(run(&missing, None, Commands::Index).is_err());
}

#[test]
fn search_open_rejects_out_of_range_index() {
    let vault = tempdir().expect("tempdir");
    fs::write(vault.path().join("a.md"), "needle").expect("write");
    let mut args = search_args("needle");
    args.open = Some(3);
    assert!(run(vault.path(), None, Commands::Search(args)).is_err());
}

#[test]
fn watch_refuses_when_auto_reindex_is_off() {
    let vault = tempdir().expect("tempdir");
    let settings = resolve_settings_path(vault.path(), None);
    let file = SettingsFile::new(&settings);
    let mut stored = file.load().expect("load");
    file.update(&mut stored, "autoReindex", "off").expect("update");

    let args = WatchArgs {
        poll_secs: 0,
        max_cycles: Some(1),
    };
    assert!(run(vault.path(), None, Commands::Watch(args)).is_err());
}

#[test]
fn core_errors_keep_their_code_in_the_payload() {
    let err = anyhow::Error::new(NoteSearchError::Validation("unknown setting: bogus".to_string()))
        .context("failed to update setting bogus");
    let payload = error_payload(&err, "settings", Path::new("/tmp/vault"));
    assert_eq!(payload.code, "VALIDATION_FAILED");
    assert_eq!(payload.operation, "settings");
    assert_eq!(
        payload.message,
        "failed to update setting bogus: validation failed: unknown setting: bogus"
    );
    assert_eq!(payload.path.as_deref(), Some("/tmp/vault"));
}

#[test]
fn plain_cli_errors_use_the_cli_code() {
    let err = anyhow::anyhow!("no result at index 3 (0 results)");
    let payload = error_payload(&err, "search", Path::new("."));
    assert_eq!(payload.code, "CLI_ERROR");
    assert_eq!(payload.message, "no result at index 3 (0 results)");
}
