//! UI string tables with a fixed fallback order.
//!
//! Lookup goes requested language, then English, then the marked placeholder
//! `[[key]]` so a missing translation is visible instead of blank.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

pub const FALLBACK_LOCALE: &str = "en";

pub type StringTable = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    tables: BTreeMap<String, StringTable>,
    default_locale: String,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self {
            tables: BTreeMap::new(),
            default_locale: FALLBACK_LOCALE.to_owned(),
        }
    }
}

impl LocaleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Language served when the caller does not ask for one.
    #[must_use]
    pub fn with_default_locale(mut self, lang: &str) -> Self {
        self.default_locale = normalize(lang);
        self
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn with_table(mut self, lang: &str, table: StringTable) -> Self {
        self.tables.insert(normalize(lang), table);
        self
    }

    /// Load every `{lang}.json` in `dir`. Unreadable or malformed files are skipped.
    #[must_use]
    pub fn load_dir(dir: &Path) -> Self {
        let mut catalog = Self::new();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "locale directory unavailable");
                return catalog;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match load_table(&path) {
                Ok(table) => {
                    debug!(lang, keys = table.len(), "loaded locale table");
                    catalog.tables.insert(normalize(lang), table);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping locale file"),
            }
        }
        info!(languages = catalog.tables.len(), "locale catalog ready");
        catalog
    }

    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.tables.contains_key(&normalize(lang))
    }

    #[must_use]
    pub fn text(&self, lang: &str, key: &str) -> String {
        [normalize(lang).as_str(), FALLBACK_LOCALE]
            .iter()
            .find_map(|l| self.tables.get(*l).and_then(|t| t.get(key)))
            .cloned()
            .unwrap_or_else(|| placeholder(key))
    }

    /// English entries overlaid with the requested language.
    #[must_use]
    pub fn table(&self, lang: &str) -> StringTable {
        let mut merged = self
            .tables
            .get(FALLBACK_LOCALE)
            .cloned()
            .unwrap_or_default();
        if let Some(requested) = self.tables.get(&normalize(lang)) {
            merged.extend(requested.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }
}

#[must_use]
pub fn placeholder(key: &str) -> String {
    format!("[[{key}]]")
}

/// `ar-EG` and `AR` both resolve to the `ar` table.
fn normalize(lang: &str) -> String {
    lang.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn load_table(path: &Path) -> anyhow::Result<StringTable> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
