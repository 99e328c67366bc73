use super::*;
use clap::Parser;

#[test]
fn search_parses_field_toggles_and_limit() {
    let cli = Cli::try_parse_from([
        "notesearch",
        "--vault",
        "notes",
        "search",
        "rust tokio",
        "--no-quotes",
        "--limit",
        "5",
    ])
    .expect("parse");
    assert_eq!(cli.vault, PathBuf::from("notes"));
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.query, "rust tokio");
            assert!(args.no_quotes);
            assert!(!args.no_content);
            assert_eq!(args.limit, Some(5));
        }
        _ => panic!("expected search command"),
    }
}

#[test]
fn complete_accepts_negative_steps() {
    let cli = Cli::try_parse_from(["notesearch", "complete", "@@ abc", "--step", "-1", "--confirm"])
        .expect("parse");
    match cli.command {
        Commands::Complete(args) => {
            assert_eq!(args.text, "@@ abc");
            assert_eq!(args.step, -1);
            assert!(args.confirm);
        }
        _ => panic!("expected complete command"),
    }
}

#[test]
fn settings_set_takes_key_and_value() {
    let cli = Cli::try_parse_from(["notesearch", "settings", "set", "tagWeight", "4"])
        .expect("parse");
    match cli.command {
        Commands::Settings(SettingsArgs {
            command: SettingsCommand::Set { key, value },
        }) => {
            assert_eq!(key, "tagWeight");
            assert_eq!(value, "4");
        }
        _ => panic!("expected settings set command"),
    }
}

#[test]
fn watch_defaults_poll_interval() {
    let cli = Cli::try_parse_from(["notesearch", "watch", "--max-cycles", "1"]).expect("parse");
    match cli.command {
        Commands::Watch(args) => {
            assert_eq!(args.poll_secs, 30);
            assert_eq!(args.max_cycles, Some(1));
        }
        _ => panic!("expected watch command"),
    }
}

#[test]
fn search_requires_a_query() {
    assert!(Cli::try_parse_from(["notesearch", "search"]).is_err());
}
