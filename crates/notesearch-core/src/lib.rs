// Public fallible APIs in this crate share one concrete error contract (`NoteSearchError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod complete;
pub mod config;
pub mod corpus;
pub mod editor;
pub mod error;
pub mod index;
pub mod notify;
pub mod parse;
pub mod search;
pub mod text;
pub mod vault;

pub use client::NoteSearch;
pub use config::{Settings, SettingsFile};
pub use corpus::{Corpus, DocumentHandle, MemoryCorpus};
pub use error::{NoteSearchError, Result};
pub use vault::LocalVault;
