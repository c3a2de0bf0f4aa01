#![forbid(unsafe_code)]
//! CSV import and export of translation entries, GlotPress style.
//!
//! Exports a list of [`TranslationEntry`] values as CRLF-delimited, double-quoted CSV with one
//! translation column per plural form of the target locale, and imports edited files back,
//! validating the header before trusting the data.
//!
//! # Quick Start
//!
//! ```rust
//! use gpcsv::{CsvCodec, LocalePluralRule, TranslationEntry};
//!
//! let fr = LocalePluralRule::for_locale("fr")?;
//! let entries = vec![TranslationEntry::new("Hello").with_translation(0, "Bonjour")];
//!
//! let codec = CsvCodec::new();
//! let csv = codec.export(&fr, &entries);
//! let imported = codec.import_str(&csv)?;
//! assert_eq!(imported.entries()[0].translation(0), Some("Bonjour"));
//! # Ok::<(), gpcsv::Error>(())
//! ```
//!
//! # Schema modes
//!
//! - **Strict**: Context, Singular, Plural, Comments, References and translation columns. The
//!   header is validated and every row must match its width.
//! - **Minimal**: Context, Singular, Plural, Comments and translation columns. The first row is
//!   dropped as a header without any checks.

pub mod codec;
pub mod error;
pub mod escape;
pub mod header;
pub mod lines;
pub mod options;
pub mod plural_expression;
pub mod plural_rules;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{CsvCodec, export_csv, import_csv, quote_row},
    error::Error,
    escape::{Escaping, escape, unescape},
    header::{build_header, validate_header},
    lines::read_lines,
    options::CodecOptions,
    plural_rules::{LocalePluralRule, PluralRule},
    schema::{Field, SchemaMode},
    traits::{CsvHooks, NoHooks, RowContext},
    types::{TranslationCollection, TranslationEntry},
};
