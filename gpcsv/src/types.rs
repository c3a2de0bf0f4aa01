//! Core types for gpcsv.
//! The CSV codec decodes into these; the encoder serializes these.

use std::{fmt::Display, io::BufRead, slice};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One translatable source string together with its translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    /// Disambiguates identical source strings used in different places.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<String>,

    /// The source text to translate.
    #[serde(default)]
    pub singular: String,

    /// The plural source text, when the string has a plural form.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub plural: Option<String>,

    /// Comments left by developers for translators.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub extracted_comments: Option<String>,

    /// Places in the code this string is used, in `path/file.php:line` form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub references: Vec<String>,

    /// Translations indexed by plural form. `None` means untranslated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub translations: Vec<Option<String>>,
}

impl TranslationEntry {
    pub fn new(singular: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.extracted_comments = Some(comments.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    pub fn with_translation(mut self, index: usize, translation: impl Into<String>) -> Self {
        self.set_translation(index, Some(translation.into()));
        self
    }

    /// Returns the translation for a plural form, if any.
    pub fn translation(&self, index: usize) -> Option<&str> {
        self.translations.get(index).and_then(|t| t.as_deref())
    }

    /// Stores a translation, padding lower plural forms with `None`.
    pub fn set_translation(&mut self, index: usize, translation: Option<String>) {
        if self.translations.len() <= index {
            self.translations.resize(index + 1, None);
        }
        self.translations[index] = translation;
    }

    /// Whether at least one plural form carries a non-empty translation.
    pub fn is_translated(&self) -> bool {
        self.translations
            .iter()
            .flatten()
            .any(|translation| !translation.is_empty())
    }
}

impl Display for TranslationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} [{}]", self.singular, context),
            None => write!(f, "{}", self.singular),
        }
    }
}

/// Ordered list of entries; row order in a file is insertion order here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationCollection {
    entries: Vec<TranslationEntry>,
}

impl TranslationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: TranslationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TranslationEntry> {
        self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, TranslationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a JSON array of entries.
    pub fn from_json_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    /// Writes the entries as a pretty-printed JSON array.
    pub fn to_json_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Json)
    }
}

impl From<Vec<TranslationEntry>> for TranslationCollection {
    fn from(entries: Vec<TranslationEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<TranslationEntry> for TranslationCollection {
    fn from_iter<I: IntoIterator<Item = TranslationEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TranslationCollection {
    type Item = TranslationEntry;
    type IntoIter = std::vec::IntoIter<TranslationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a TranslationCollection {
    type Item = &'a TranslationEntry;
    type IntoIter = slice::Iter<'a, TranslationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
