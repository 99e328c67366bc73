use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NoteSearchError, Result};
use crate::search::FieldWeights;
use crate::text::folder_prefixes;

mod env;
mod store;

pub use store::SettingsFile;

const ENV_EXCLUDED_FOLDERS: &str = "NOTESEARCH_EXCLUDED_FOLDERS";
const ENV_AUTOCOMPLETE_FOLDERS: &str = "NOTESEARCH_AUTOCOMPLETE_FOLDERS";
const ENV_CACHE_UPDATE_INTERVAL: &str = "NOTESEARCH_CACHE_UPDATE_INTERVAL";
const ENV_AUTO_REINDEX: &str = "NOTESEARCH_AUTO_REINDEX";

pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 10;
/// One year of minutes.
pub const MAX_INTERVAL_MINUTES: f64 = 525_600.0;

/// Persisted, flat key-value settings. Keys are camelCase on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub file_name_weight: u32,
    pub directory_weight: u32,
    pub tag_weight: u32,
    pub heading1_weight: u32,
    pub heading2_weight: u32,
    pub heading3_weight: u32,
    pub heading4_weight: u32,
    pub content_weight: u32,
    pub quote_weight: u32,
    pub excluded_folders: String,
    /// Minutes between timer-driven rebuilds.
    pub cache_update_interval: f64,
    pub auto_reindex: bool,
    pub autocomplete_enabled: bool,
    pub min_chinese_length: usize,
    pub min_english_length: usize,
    pub autocomplete_folders: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name_weight: 10,
            directory_weight: 9,
            tag_weight: 8,
            heading1_weight: 7,
            heading2_weight: 6,
            heading3_weight: 5,
            heading4_weight: 4,
            content_weight: 3,
            quote_weight: 2,
            excluded_folders: String::new(),
            cache_update_interval: 60.0,
            auto_reindex: true,
            autocomplete_enabled: true,
            min_chinese_length: 2,
            min_english_length: 3,
            autocomplete_folders: String::new(),
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn weights(&self) -> FieldWeights {
        FieldWeights {
            file_name: self.file_name_weight,
            directory: self.directory_weight,
            tag: self.tag_weight,
            heading1: self.heading1_weight,
            heading2: self.heading2_weight,
            heading3: self.heading3_weight,
            heading4: self.heading4_weight,
            content: self.content_weight,
            quote: self.quote_weight,
        }
    }

    #[must_use]
    pub fn excluded_prefixes(&self) -> Vec<String> {
        folder_prefixes(&self.excluded_folders)
    }

    #[must_use]
    pub fn autocomplete_prefixes(&self) -> Vec<String> {
        folder_prefixes(&self.autocomplete_folders)
    }

    /// Layers `NOTESEARCH_*` environment overrides over the loaded values.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(raw) = env::read_raw_env(ENV_EXCLUDED_FOLDERS) {
            self.excluded_folders = raw.trim().to_string();
        }
        if let Some(raw) = env::read_raw_env(ENV_AUTOCOMPLETE_FOLDERS) {
            self.autocomplete_folders = raw.trim().to_string();
        }
        if let Some(minutes) =
            env::read_env_f64(ENV_CACHE_UPDATE_INTERVAL).filter(|value| valid_interval(*value))
        {
            self.cache_update_interval = minutes;
        }
        if let Some(raw) = env::read_non_empty_env(ENV_AUTO_REINDEX) {
            self.auto_reindex = env::parse_enabled_default_true(Some(&raw));
        }
        self
    }

    /// Applies a raw user-entered value to `key`.
    ///
    /// Returns `Ok(false)` when the value is rejected; the previous value is
    /// kept. Unknown keys are a validation error.
    pub fn apply_raw(&mut self, key: &str, raw: &str) -> Result<bool> {
        let raw = raw.trim();
        let applied = match key {
            "fileNameWeight" => set_weight(&mut self.file_name_weight, raw),
            "directoryWeight" => set_weight(&mut self.directory_weight, raw),
            "tagWeight" => set_weight(&mut self.tag_weight, raw),
            "heading1Weight" => set_weight(&mut self.heading1_weight, raw),
            "heading2Weight" => set_weight(&mut self.heading2_weight, raw),
            "heading3Weight" => set_weight(&mut self.heading3_weight, raw),
            "heading4Weight" => set_weight(&mut self.heading4_weight, raw),
            "contentWeight" => set_weight(&mut self.content_weight, raw),
            "quoteWeight" => set_weight(&mut self.quote_weight, raw),
            "excludedFolders" => {
                self.excluded_folders = raw.to_string();
                true
            }
            "autocompleteFolders" => {
                self.autocomplete_folders = raw.to_string();
                true
            }
            "cacheUpdateInterval" => match raw.parse::<f64>() {
                Ok(minutes) if valid_interval(minutes) => {
                    self.cache_update_interval = minutes;
                    true
                }
                _ => false,
            },
            "autoReindex" => set_flag(&mut self.auto_reindex, raw),
            "autocompleteEnabled" => set_flag(&mut self.autocomplete_enabled, raw),
            "minChineseLength" => set_count(&mut self.min_chinese_length, raw),
            "minEnglishLength" => set_count(&mut self.min_english_length, raw),
            other => {
                return Err(NoteSearchError::Validation(format!(
                    "unknown setting: {other}"
                )));
            }
        };
        if !applied {
            debug!(key, raw, "rejected setting value");
        }
        Ok(applied)
    }

    /// Resets values a hand-edited settings file may carry outside the
    /// accepted ranges to their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let slots = [
            ("fileNameWeight", &mut self.file_name_weight, defaults.file_name_weight),
            ("directoryWeight", &mut self.directory_weight, defaults.directory_weight),
            ("tagWeight", &mut self.tag_weight, defaults.tag_weight),
            ("heading1Weight", &mut self.heading1_weight, defaults.heading1_weight),
            ("heading2Weight", &mut self.heading2_weight, defaults.heading2_weight),
            ("heading3Weight", &mut self.heading3_weight, defaults.heading3_weight),
            ("heading4Weight", &mut self.heading4_weight, defaults.heading4_weight),
            ("contentWeight", &mut self.content_weight, defaults.content_weight),
            ("quoteWeight", &mut self.quote_weight, defaults.quote_weight),
        ];
        for (key, slot, default) in slots {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&*slot) {
                debug!(key, stored = *slot, default, "stored weight out of range, using default");
                *slot = default;
            }
        }
        if !valid_interval(self.cache_update_interval) {
            debug!(
                stored = self.cache_update_interval,
                default = defaults.cache_update_interval,
                "stored cacheUpdateInterval out of range, using default"
            );
            self.cache_update_interval = defaults.cache_update_interval;
        }
        self
    }
}

fn valid_interval(minutes: f64) -> bool {
    minutes.is_finite() && minutes > 0.0 && minutes <= MAX_INTERVAL_MINUTES
}

fn set_weight(slot: &mut u32, raw: &str) -> bool {
    match raw.parse::<u32>() {
        Ok(value) if (MIN_WEIGHT..=MAX_WEIGHT).contains(&value) => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn set_count(slot: &mut usize, raw: &str) -> bool {
    match raw.parse::<usize>() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => false,
    }
}

fn set_flag(slot: &mut bool, raw: &str) -> bool {
    match env::parse_flag(raw) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_weights() {
        let settings = Settings::default();
        let weights = settings.weights();
        assert_eq!(weights.file_name, 10);
        assert_eq!(weights.directory, 9);
        assert_eq!(weights.tag, 8);
        assert_eq!(weights.heading4, 4);
        assert_eq!(weights.quote, 2);
        assert!((settings.cache_update_interval - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_numeric_input_keeps_previous_value() {
        let mut settings = Settings::default();
        assert!(!settings.apply_raw("contentWeight", "eleven").expect("known key"));
        assert!(!settings.apply_raw("contentWeight", "0").expect("known key"));
        assert!(!settings.apply_raw("contentWeight", "11").expect("known key"));
        assert_eq!(settings.content_weight, 3);

        assert!(!settings.apply_raw("cacheUpdateInterval", "soon").expect("known key"));
        assert!(!settings.apply_raw("cacheUpdateInterval", "-5").expect("known key"));
        assert!(!settings.apply_raw("cacheUpdateInterval", "1e300").expect("known key"));
        assert!(!settings.apply_raw("cacheUpdateInterval", "inf").expect("known key"));
        assert!((settings.cache_update_interval - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn valid_input_is_applied() {
        let mut settings = Settings::default();
        assert!(settings.apply_raw("contentWeight", " 7 ").expect("known key"));
        assert!(settings.apply_raw("cacheUpdateInterval", "15").expect("known key"));
        assert!(settings.apply_raw("autoReindex", "off").expect("known key"));
        assert!(settings.apply_raw("excludedFolders", "Archive, Trash").expect("known key"));
        assert_eq!(settings.content_weight, 7);
        assert!((settings.cache_update_interval - 15.0).abs() < f64::EPSILON);
        assert!(!settings.auto_reindex);
        assert_eq!(settings.excluded_prefixes(), vec!["Archive", "Trash"]);
    }

    #[test]
    fn interval_ceiling_is_inclusive() {
        let mut settings = Settings::default();
        assert!(settings.apply_raw("cacheUpdateInterval", "525600").expect("known key"));
        assert!(!settings.apply_raw("cacheUpdateInterval", "525601").expect("known key"));
        assert!((settings.cache_update_interval - MAX_INTERVAL_MINUTES).abs() < f64::EPSILON);
    }

    #[test]
    fn sanitized_resets_out_of_range_values() {
        let settings = Settings {
            file_name_weight: 4_000_000_000,
            directory_weight: 0,
            tag_weight: 5,
            cache_update_interval: f64::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.file_name_weight, 10);
        assert_eq!(settings.directory_weight, 9);
        assert_eq!(settings.tag_weight, 5);
        assert!((settings.cache_update_interval - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut settings = Settings::default();
        let err = settings.apply_raw("colour", "blue").expect_err("unknown key");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }
}
