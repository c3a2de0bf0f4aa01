use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use gpcsv::{CodecOptions, CsvCodec, LocalePluralRule, TranslationCollection, quote_row};
use tracing::debug;

/// Reads a JSON array of entries and writes it as CSV to `output`, or stdout.
pub fn run_export_command(
    input: &Path,
    output: Option<&Path>,
    rule: &LocalePluralRule,
    options: CodecOptions,
) -> Result<(), String> {
    let collection = read_entries(input)?;
    debug!(
        "exporting {} entries ({} mode, project {:?})",
        collection.len(),
        options.mode,
        options.project
    );

    let codec = CsvCodec::with_options(options);
    match output {
        Some(path) => codec
            .export_to_file(rule, &collection, path)
            .map_err(|e| format!("Error writing {}: {}", path.display(), e)),
        None => codec
            .write_to(rule, &collection, io::stdout().lock())
            .map_err(|e| e.to_string()),
    }
}

/// Prints the header row for `rule`.
pub fn run_header_command(rule: &LocalePluralRule, options: CodecOptions) {
    let header = CsvCodec::with_options(options).header(rule);
    println!("{}", quote_row(&header));
}

fn read_entries(input: &Path) -> Result<TranslationCollection, String> {
    let file =
        File::open(input).map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
    TranslationCollection::from_json_reader(BufReader::new(file))
        .map_err(|e| format!("Invalid entries in {}: {}", input.display(), e))
}
