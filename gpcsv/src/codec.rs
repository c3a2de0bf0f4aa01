//! This module provides the `CsvCodec` struct, which exports translation entries to CSV text
//! and imports them back.
//!
//! An exported file has one header row followed by one row per entry. Every cell is wrapped in
//! double quotes, cells are separated by commas, and rows by CRLF, with a trailing CRLF after the
//! last row. The translation columns depend on the locale's plural rule.
//!
//! Imports are all-or-nothing: any structural problem (missing file, invalid header, a row with
//! the wrong number of fields) fails the whole import.
use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    error::Error,
    escape::Escaping,
    header::{build_header, translation_column_count, validate_header},
    lines::{ROW_SEPARATOR, read_lines, split_rows},
    options::CodecOptions,
    plural_rules::PluralRule,
    schema::{Field, SchemaMode},
    traits::{CsvHooks, NoHooks, RowContext},
    types::{TranslationCollection, TranslationEntry},
};

/// Reads and writes translation entries as CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvCodec<H = NoHooks> {
    options: CodecOptions,
    hooks: H,
}

impl CsvCodec<NoHooks> {
    /// Creates a strict-mode codec without hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with the given options and no hooks.
    pub fn with_options(options: CodecOptions) -> Self {
        CsvCodec {
            options,
            hooks: NoHooks,
        }
    }
}

impl<H: CsvHooks> CsvCodec<H> {
    /// Replaces the export hooks.
    pub fn with_hooks<T: CsvHooks>(self, hooks: T) -> CsvCodec<T> {
        CsvCodec {
            options: self.options,
            hooks,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn mode(&self) -> SchemaMode {
        self.options.mode
    }

    /// The header written for `rule`, after the header hook ran.
    pub fn header(&self, rule: &dyn PluralRule) -> Vec<String> {
        let header = build_header(rule, self.options.mode);
        self.hooks.transform_header(header, rule)
    }

    /// Serializes `entries` for the locale described by `rule`.
    ///
    /// An empty entry list still produces the header row.
    pub fn export<'a, I>(&self, rule: &dyn PluralRule, entries: I) -> String
    where
        I: IntoIterator<Item = &'a TranslationEntry>,
    {
        let mut lines = vec![quote_row(&self.header(rule))];
        lines.extend(
            entries
                .into_iter()
                .map(|entry| quote_row(&self.export_row(rule, entry))),
        );
        trace!("exported {} CSV rows", lines.len() - 1);

        let mut output = lines.join(ROW_SEPARATOR);
        output.push_str(ROW_SEPARATOR);
        output
    }

    /// Escaped cells for one entry, after the row hook ran.
    pub fn export_row(&self, rule: &dyn PluralRule, entry: &TranslationEntry) -> Vec<String> {
        let mode = self.options.mode;
        let escaping = mode.escaping();

        let row = mode
            .fixed_fields()
            .iter()
            .copied()
            .chain((0..translation_column_count(rule)).map(Field::Translation))
            .map(|field| field.encode(entry, escaping))
            .collect();

        let ctx = RowContext {
            project: self.options.project.as_deref(),
            rule,
            entry,
        };
        self.hooks.transform_row(row, &ctx)
    }

    /// Writes the export to any writer (file, memory, etc.).
    pub fn write_to<'a, I, W>(
        &self,
        rule: &dyn PluralRule,
        entries: I,
        mut writer: W,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a TranslationEntry>,
        W: Write,
    {
        writer.write_all(self.export(rule, entries).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the export to a file path.
    pub fn export_to_file<'a, I, P>(
        &self,
        rule: &dyn PluralRule,
        entries: I,
        path: P,
    ) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a TranslationEntry>,
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        self.write_to(rule, entries, BufWriter::new(file))
    }

    /// Imports the CSV file at `path`.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<TranslationCollection, Error> {
        let rows = read_lines(path)?;
        self.import_rows(&rows)
    }

    /// Imports CSV text held in memory.
    pub fn import_str(&self, content: &str) -> Result<TranslationCollection, Error> {
        self.import_rows(&split_rows(content))
    }

    /// Imports already split, non-empty rows. The first row is the header.
    ///
    /// In strict mode the header is validated and every data row must have exactly as many
    /// fields as the header. In minimal mode the first row is dropped without being looked at,
    /// even when it holds data.
    pub fn import_rows<S: AsRef<str>>(&self, rows: &[S]) -> Result<TranslationCollection, Error> {
        let mode = self.options.mode;
        let escaping = mode.escaping();

        let Some((header_row, data_rows)) = rows.split_first() else {
            return Err(Error::NoRows);
        };

        let header_len = match mode {
            SchemaMode::Strict => {
                let header = split_fields(header_row.as_ref(), escaping)?;
                validate_header(&header)?;
                Some(header.len())
            }
            SchemaMode::Minimal => None,
        };

        let mut collection = TranslationCollection::new();

        for (index, row) in data_rows.iter().enumerate() {
            let cells = split_fields(row.as_ref(), escaping)?;

            if let Some(expected) = header_len {
                if cells.len() != expected {
                    debug!(
                        "An error occurred while importing the CSV file: The file header has {} columns, and the rows have {}.",
                        expected,
                        cells.len()
                    );
                    return Err(Error::ColumnCountMismatch {
                        // rows are 1-based and the header is row 1
                        row: index + 2,
                        expected,
                        found: cells.len(),
                    });
                }
            }

            let mut entry = TranslationEntry::default();
            for (position, cell) in cells.iter().enumerate() {
                if let Some(field) = mode.field_at(position) {
                    field.decode(&mut entry, cell, mode);
                }
            }
            collection.add_entry(entry);
        }

        trace!("imported {} entries", collection.len());
        Ok(collection)
    }
}

/// Exports `entries` with default options and no hooks.
pub fn export_csv<'a, I>(rule: &dyn PluralRule, entries: I, mode: SchemaMode) -> String
where
    I: IntoIterator<Item = &'a TranslationEntry>,
{
    CsvCodec::with_options(CodecOptions::new().with_mode(mode)).export(rule, entries)
}

/// Imports the CSV file at `path` in `mode`.
pub fn import_csv<P: AsRef<Path>>(
    path: P,
    mode: SchemaMode,
) -> Result<TranslationCollection, Error> {
    CsvCodec::with_options(CodecOptions::new().with_mode(mode)).import_file(path)
}

/// Joins already escaped cells into one quoted line, without the row separator.
pub fn quote_row(cells: &[String]) -> String {
    format!("\"{}\"", cells.join("\",\""))
}

/// Splits one row into raw (still escaped) cells with the csv reader.
fn split_fields(row: &str, escaping: Escaping) -> Result<Vec<String>, Error> {
    let row = match escaping {
        Escaping::Full => normalize_escaped_quotes(row),
        Escaping::LineBreaks => Cow::Borrowed(row),
    };

    // Rows are already split on CRLF, so stray CR or LF bytes are cell content.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\0'))
        .from_reader(row.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(str::to_string).collect())
}

/// Rewrites backslash-escaped quotes as doubled quotes, the form the csv reader understands.
///
/// Backslash pairs are consumed together, so an escaped backslash right before a closing quote
/// (`\\"`) still ends the cell. Other escapes are left for [`Escaping::unescape`].
fn normalize_escaped_quotes(row: &str) -> Cow<'_, str> {
    if !row.contains('\\') {
        return Cow::Borrowed(row);
    }

    let mut normalized = String::with_capacity(row.len() + 8);
    let mut chars = row.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            normalized.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => normalized.push_str("\"\""),
            Some(next) => {
                normalized.push('\\');
                normalized.push(next);
            }
            None => normalized.push('\\'),
        }
    }
    Cow::Owned(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural_rules::LocalePluralRule;

    fn en() -> LocalePluralRule {
        LocalePluralRule::for_locale("en").unwrap()
    }

    const STRICT_HEADER: &str = r#""Context","Singular","Plural","Comments","References","Translation""#;

    fn csv(rows: &[&str]) -> String {
        let mut content = rows.join("\r\n");
        content.push_str("\r\n");
        content
    }

    #[test]
    fn test_export_binary_locale() {
        let entries = vec![
            TranslationEntry::new("Hello")
                .with_reference("hello.php:3")
                .with_translation(0, "Bonjour"),
            TranslationEntry::new("%d file")
                .with_plural("%d files")
                .with_context("upload")
                .with_comments("Number of files")
                .with_translation(0, "%d fichier")
                .with_translation(1, "%d fichiers"),
        ];

        let output = CsvCodec::new().export(&en(), &entries);
        assert_eq!(
            output,
            csv(&[
                r#""Context","Singular","Plural","Comments","References","Translation (Singular)","Translation (Plural)""#,
                r#""","Hello","","","hello.php:3","Bonjour","""#,
                r#""upload","%d file","%d files","Number of files","","%d fichier","%d fichiers""#,
            ])
        );
    }

    #[test]
    fn test_export_empty_collection_is_header_only() {
        let ja = LocalePluralRule::for_locale("ja").unwrap();
        let output = CsvCodec::new().export(&ja, &Vec::new());
        assert_eq!(output, format!("{}\r\n", STRICT_HEADER));
    }

    #[test]
    fn test_export_escapes_cells() {
        let ja = LocalePluralRule::for_locale("ja").unwrap();
        let entries = vec![
            TranslationEntry::new("Say \"hi\",\nthen\tleave")
                .with_reference("a.php:1")
                .with_reference("b.php:2")
                .with_translation(0, r"C:\temp"),
        ];
        let output = CsvCodec::new().export(&ja, &entries);
        let row = output.split("\r\n").nth(1).unwrap();
        assert_eq!(
            row,
            r#""","Say \"hi\",\nthen\tleave","","","a.php:1\nb.php:2","C:\\temp""#
        );
    }

    #[test]
    fn test_export_general_case_skips_missing_and_extra_forms() {
        let ru = LocalePluralRule::for_locale("ru").unwrap();
        let mut entry = TranslationEntry::new("%d apple").with_plural("%d apples");
        entry.translations = vec![
            Some("%d яблоко".to_string()),
            None,
            Some(String::new()),
            Some("ignored".to_string()),
        ];
        let row = CsvCodec::new().export_row(&ru, &entry);
        assert_eq!(row.len(), 8);
        assert_eq!(&row[5..], &["%d яблоко", "", ""]);
    }

    #[test]
    fn test_import_concrete_scenario() {
        let content = csv(&[STRICT_HEADER, r#""","Hello","","","","Bonjour""#]);
        let collection = CsvCodec::new().import_str(&content).unwrap();

        assert_eq!(collection.len(), 1);
        let entry = &collection.entries()[0];
        assert_eq!(entry.singular, "Hello");
        assert_eq!(entry.context, None);
        assert_eq!(entry.plural, None);
        assert_eq!(entry.extracted_comments, None);
        assert!(entry.references.is_empty());
        assert_eq!(entry.translations, vec![Some("Bonjour".to_string())]);
    }

    #[test]
    fn test_import_rejects_invalid_header() {
        let content = csv(&[
            r#""Context","Singular","Plural","Comments","References","Foo""#,
            r#""","Hello","","","","Bonjour""#,
        ]);
        match CsvCodec::new().import_str(&content) {
            Err(Error::HeaderMismatch(labels)) => assert_eq!(labels, vec!["Foo".to_string()]),
            other => panic!("expected header mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_import_column_count_mismatch_fails_whole_import() {
        let content = csv(&[
            STRICT_HEADER,
            r#""","One","","","","Un""#,
            r#""","Two","","","""#,
            r#""","Three","","","","Trois""#,
        ]);
        match CsvCodec::new().import_str(&content) {
            Err(Error::ColumnCountMismatch {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 6);
                assert_eq!(found, 5);
            }
            other => panic!("expected column count mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_import_skips_blank_lines() {
        let with_blanks = format!(
            "{}\r\n\r\n{}\r\n\r\n\r\n{}\r\n",
            STRICT_HEADER, r#""","One","","","","Un""#, r#""","Two","","","","Deux""#
        );
        let without_blanks = csv(&[
            STRICT_HEADER,
            r#""","One","","","","Un""#,
            r#""","Two","","","","Deux""#,
        ]);
        let codec = CsvCodec::new();
        assert_eq!(
            codec.import_str(&with_blanks).unwrap(),
            codec.import_str(&without_blanks).unwrap()
        );
    }

    #[test]
    fn test_import_no_rows() {
        assert!(matches!(CsvCodec::new().import_str(""), Err(Error::NoRows)));
        assert!(matches!(
            CsvCodec::new().import_str("\r\n\r\n"),
            Err(Error::NoRows)
        ));
    }

    #[test]
    fn test_import_header_only_is_empty_collection() {
        let collection = CsvCodec::new().import_str(&csv(&[STRICT_HEADER])).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_import_unescapes_cells() {
        let content = csv(&[
            STRICT_HEADER,
            r#""ctx","Say \"hi\",\nthen\tleave","","","a.php:1\nb.php:2","C:\\temp\\""#,
        ]);
        let collection = CsvCodec::new().import_str(&content).unwrap();
        let entry = &collection.entries()[0];
        assert_eq!(entry.context.as_deref(), Some("ctx"));
        assert_eq!(entry.singular, "Say \"hi\",\nthen\tleave");
        assert_eq!(entry.references, vec!["a.php:1", "b.php:2"]);
        assert_eq!(entry.translation(0), Some("C:\\temp\\"));
    }

    #[test]
    fn test_import_ignores_columns_past_last_translation_slot() {
        let header = r#""Context","Singular","Plural","Comments","References","Translation","Translation","Translation","Translation","Translation","Translation","Notes""#;
        let row = r#""","Hi","","","","0","1","2","3","4","5","note""#;
        let collection = CsvCodec::new().import_str(&csv(&[header, row])).unwrap();
        let entry = &collection.entries()[0];
        assert_eq!(entry.translations.len(), 6);
        assert_eq!(entry.translation(5), Some("5"));
    }

    #[test]
    fn test_import_tolerates_unterminated_quote() {
        let content = csv(&[r#""Context","Singular""#, r#""ctx","open"#]);
        let collection = CsvCodec::new().import_str(&content).unwrap();
        assert_eq!(collection.entries()[0].singular, "open");
    }

    #[test]
    fn test_round_trip_strict() {
        let ru = LocalePluralRule::for_locale("ru").unwrap();
        let entries = vec![
            TranslationEntry::new("%d comment")
                .with_plural("%d comments")
                .with_context("admin \"bar\"")
                .with_comments("Line one\nLine\ttwo")
                .with_reference("wp-admin/edit.php:10")
                .with_reference("wp-admin/post.php:20")
                .with_translation(0, "%d комментарий")
                .with_translation(1, "%d комментария")
                .with_translation(2, "%d комментариев"),
            TranslationEntry::new(r"Back\slash, comma"),
        ];
        let codec = CsvCodec::new();
        let imported = codec.import_str(&codec.export(&ru, &entries)).unwrap();
        assert_eq!(imported.into_entries(), entries);
    }

    #[test]
    fn test_minimal_mode_export() {
        let codec = CsvCodec::with_options(CodecOptions::new().with_mode(SchemaMode::Minimal));
        let entries = vec![
            TranslationEntry::new("Say \"hi\"")
                .with_reference("ignored.php:1")
                .with_translation(0, "Dis\tbonjour"),
        ];
        assert_eq!(
            codec.export(&en(), &entries),
            csv(&[
                r#""Context","Singular","Plural","Comments","Translation for Singular","Translation for Plural""#,
                r#""","Say "hi"","","","Dis\tbonjour","""#,
            ])
        );
    }

    #[test]
    fn test_minimal_mode_import_keeps_explicit_none() {
        let codec = CsvCodec::with_options(CodecOptions::new().with_mode(SchemaMode::Minimal));
        let content = csv(&[
            r#""Context","Singular","Plural","Comments","Translation for Singular","Translation for Plural""#,
            r#""","%d item","%d items","","","%d éléments""#,
        ]);
        let collection = codec.import_str(&content).unwrap();
        let entry = &collection.entries()[0];
        assert_eq!(entry.plural.as_deref(), Some("%d items"));
        assert_eq!(
            entry.translations,
            vec![None, Some("%d éléments".to_string())]
        );
    }

    #[test]
    fn test_minimal_mode_drops_first_row_even_without_header() {
        let codec = CsvCodec::with_options(CodecOptions::new().with_mode(SchemaMode::Minimal));
        let content = csv(&[r#""","First","","","Premier""#, r#""","Second","","","Deuxième""#]);
        let collection = codec.import_str(&content).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.entries()[0].singular, "Second");
    }

    #[test]
    fn test_minimal_mode_does_not_check_field_counts() {
        let codec = CsvCodec::with_options(CodecOptions::new().with_mode(SchemaMode::Minimal));
        let content = csv(&[
            r#""Context","Singular","Plural","Comments","Translation""#,
            r#""","Short""#,
            r#""","Long","","","a","b","c""#,
        ]);
        let collection = codec.import_str(&content).unwrap();
        assert_eq!(collection.len(), 2);
        assert!(collection.entries()[0].translations.is_empty());
        assert_eq!(collection.entries()[1].translations.len(), 3);
    }

    struct StatusColumn;

    impl CsvHooks for StatusColumn {
        fn transform_header(&self, mut header: Vec<String>, _rule: &dyn PluralRule) -> Vec<String> {
            header.retain(|label| label != "References");
            header.push("Status".to_string());
            header
        }

        fn transform_row(&self, mut row: Vec<String>, ctx: &RowContext<'_>) -> Vec<String> {
            row.remove(4);
            let status = match (ctx.project, ctx.entry.is_translated()) {
                (Some(project), true) => format!("{}: done", project),
                (Some(project), false) => format!("{}: todo", project),
                (None, _) => String::new(),
            };
            row.push(status);
            row
        }
    }

    #[test]
    fn test_hooks_rewrite_header_and_rows() {
        let codec = CsvCodec::with_options(CodecOptions::new().with_project(Some("wp".to_string())))
            .with_hooks(StatusColumn);
        let entries = vec![
            TranslationEntry::new("Yes").with_translation(0, "Oui"),
            TranslationEntry::new("No"),
        ];
        assert_eq!(
            codec.export(&en(), &entries),
            csv(&[
                r#""Context","Singular","Plural","Comments","Translation (Singular)","Translation (Plural)","Status""#,
                r#""","Yes","","","Oui","","wp: done""#,
                r#""","No","","","","","wp: todo""#,
            ])
        );
    }

    #[test]
    fn test_normalize_escaped_quotes() {
        assert_eq!(normalize_escaped_quotes(r#""a","b""#), r#""a","b""#);
        assert_eq!(normalize_escaped_quotes(r#""say \"x\"""#), r#""say ""x""""#);
        assert_eq!(normalize_escaped_quotes(r#""end\\","n""#), r#""end\\","n""#);
        assert_eq!(normalize_escaped_quotes(r#""\n\t""#), r#""\n\t""#);
    }

    #[test]
    fn test_write_to_writer() {
        let mut output = Vec::new();
        CsvCodec::new()
            .write_to(&en(), &vec![TranslationEntry::new("Hi")], &mut output)
            .unwrap();
        assert!(
            String::from_utf8(output)
                .unwrap()
                .ends_with("\"Hi\",\"\",\"\",\"\",\"\",\"\"\r\n")
        );
    }
}
