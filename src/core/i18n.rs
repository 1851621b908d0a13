use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for the static copy entry
pub const COPY_SELECTION_KEY: &str = "Copy Selection";

/// Lookup of display text for a translation key
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

/// Returns every key unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Translations loaded from configuration; unknown keys fall back to the key itself.
///
/// An exact key match wins. Otherwise the first key in sorted order that matches
/// ignoring ASCII case is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable(BTreeMap<String, String>);

impl TranslationTable {
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.0.insert(key.into(), text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Translate for TranslationTable {
    fn translate(&self, key: &str) -> String {
        self.0
            .get(key)
            // Config sources may normalise key case
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, text)| text)
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
