//! Column layout of the CSV file.
//!
//! Each column maps to one [`Field`] of a [`TranslationEntry`]; adding or removing a column is a
//! change to the tables below, not to the codec.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, escape::Escaping, types::TranslationEntry};

/// Marker joining references inside the References cell, as it appears on the wire.
pub const REFERENCE_SEPARATOR: &str = r"\n";

/// Translation slots checked by header validation and mapped on import in strict mode.
pub const MAX_TRANSLATION_SLOTS: usize = 6;

/// Label every translation column starts with.
pub const TRANSLATION_LABEL: &str = "Translation";

/// Selects the column schema, escaping and import checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Context, Singular, Plural, Comments, References, translations. The header is validated
    /// and every row must have as many fields as the header.
    #[default]
    Strict,
    /// Context, Singular, Plural, Comments, translations. The first row is dropped as a header
    /// without looking at it.
    Minimal,
}

impl SchemaMode {
    /// Fixed leading columns, in file order.
    pub fn fixed_fields(self) -> &'static [Field] {
        match self {
            SchemaMode::Strict => &[
                Field::Context,
                Field::Singular,
                Field::Plural,
                Field::Comments,
                Field::References,
            ],
            SchemaMode::Minimal => &[
                Field::Context,
                Field::Singular,
                Field::Plural,
                Field::Comments,
            ],
        }
    }

    pub fn escaping(self) -> Escaping {
        match self {
            SchemaMode::Strict => Escaping::Full,
            SchemaMode::Minimal => Escaping::LineBreaks,
        }
    }

    /// The field a cell at `position` is imported into, if any.
    pub fn field_at(self, position: usize) -> Option<Field> {
        let fixed = self.fixed_fields();
        if let Some(field) = fixed.get(position) {
            return Some(*field);
        }
        let slot = position - fixed.len();
        match self {
            SchemaMode::Strict if slot >= MAX_TRANSLATION_SLOTS => None,
            _ => Some(Field::Translation(slot)),
        }
    }

    /// Text placed around the plural description in translation column labels.
    pub(crate) fn translation_label(self, description: &str) -> String {
        match self {
            SchemaMode::Strict => format!("{} ({})", TRANSLATION_LABEL, description),
            SchemaMode::Minimal => format!("{} for {}", TRANSLATION_LABEL, description),
        }
    }
}

impl FromStr for SchemaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "full" => Ok(SchemaMode::Strict),
            "minimal" => Ok(SchemaMode::Minimal),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl Display for SchemaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMode::Strict => write!(f, "strict"),
            SchemaMode::Minimal => write!(f, "minimal"),
        }
    }
}

/// An attribute of a [`TranslationEntry`] that owns one CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Context,
    Singular,
    Plural,
    Comments,
    References,
    /// Translation for the plural form with this index.
    Translation(usize),
}

impl Field {
    /// The column label expected in a standard header.
    pub fn label(self) -> &'static str {
        match self {
            Field::Context => "Context",
            Field::Singular => "Singular",
            Field::Plural => "Plural",
            Field::Comments => "Comments",
            Field::References => "References",
            Field::Translation(_) => TRANSLATION_LABEL,
        }
    }

    /// Whether a header cell is acceptable for this column.
    ///
    /// Translation columns only need the `Translation` prefix, since their labels carry
    /// locale-specific suffixes such as `(Singular)`.
    pub fn accepts_label(self, label: &str) -> bool {
        match self {
            Field::Translation(_) => label.starts_with(TRANSLATION_LABEL),
            _ => label == self.label(),
        }
    }

    /// Escaped cell content for `entry`; absent values give an empty cell.
    pub fn encode(self, entry: &TranslationEntry, escaping: Escaping) -> String {
        let raw = match self {
            Field::Context => entry.context.clone(),
            Field::Singular => Some(entry.singular.clone()),
            Field::Plural => entry.plural.clone(),
            Field::Comments => entry.extracted_comments.clone(),
            Field::References => Some(entry.references.join("\n")),
            Field::Translation(index) => entry
                .translation(index)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        };
        raw.map(|text| escaping.escape(&text)).unwrap_or_default()
    }

    /// Applies a raw (still escaped) cell to `entry`.
    ///
    /// Empty cells leave the attribute unset; in minimal mode empty translation cells are kept
    /// as an explicit `None`.
    pub fn decode(self, entry: &mut TranslationEntry, raw: &str, mode: SchemaMode) {
        let escaping = mode.escaping();
        if raw.is_empty() {
            if let (SchemaMode::Minimal, Field::Translation(index)) = (mode, self) {
                entry.set_translation(index, None);
            }
            return;
        }

        match self {
            Field::Context => entry.context = Some(escaping.unescape(raw)),
            Field::Singular => entry.singular = escaping.unescape(raw),
            Field::Plural => entry.plural = Some(escaping.unescape(raw)),
            Field::Comments => entry.extracted_comments = Some(escaping.unescape(raw)),
            Field::References => entry.references.extend(
                raw.split(REFERENCE_SEPARATOR)
                    .map(|reference| escaping.unescape(reference)),
            ),
            Field::Translation(index) => {
                entry.set_translation(index, Some(escaping.unescape(raw)))
            }
        }
    }
}

/// Columns of the standard strict header, in order, including every translation slot.
pub fn standard_fields() -> impl Iterator<Item = Field> {
    SchemaMode::Strict
        .fixed_fields()
        .iter()
        .copied()
        .chain((0..MAX_TRANSLATION_SLOTS).map(Field::Translation))
}
