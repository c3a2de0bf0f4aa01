use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use gpcsv::{CodecOptions, CsvCodec, TranslationCollection};
use tracing::debug;

/// Imports a CSV file and writes its entries as pretty JSON to `output`, or stdout.
pub fn run_import_command(
    input: &Path,
    output: Option<&Path>,
    options: CodecOptions,
) -> Result<(), String> {
    let collection = import(input, options)?;
    debug!("imported {} entries from {}", collection.len(), input.display());

    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
            let mut writer = BufWriter::new(file);
            collection
                .to_json_writer(&mut writer)
                .map_err(|e| e.to_string())?;
            writer
                .flush()
                .map_err(|e| format!("Error writing {}: {}", path.display(), e))
        }
        None => {
            let mut stdout = io::stdout().lock();
            collection
                .to_json_writer(&mut stdout)
                .map_err(|e| e.to_string())?;
            writeln!(stdout).map_err(|e| e.to_string())
        }
    }
}

/// Imports `input`, prefixing failures with the file name.
pub fn import(input: &Path, options: CodecOptions) -> Result<TranslationCollection, String> {
    CsvCodec::with_options(options)
        .import_file(input)
        .map_err(|e| format!("Error importing {}: {}", input.display(), e))
}
