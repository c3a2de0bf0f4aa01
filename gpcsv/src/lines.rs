//! Reading CSV files into rows.
//!
//! Rows are separated by CRLF only. A file using bare LF or CR line endings comes back as a
//! single row.

use std::{fs::File, io::Read, path::Path};

use crate::error::Error;

/// Row separator used when reading and writing.
pub const ROW_SEPARATOR: &str = "\r\n";

/// Reads the whole file at `path` and returns its non-empty rows in file order.
///
/// A missing, unreadable or empty file is reported as [`Error::FileUnavailable`]. A byte order
/// mark is honoured: UTF-8 BOMs are stripped and UTF-16 files are transcoded.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file_unavailable(path, e.to_string()))?;

    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding_rs::UTF_8))
        .bom_override(true)
        .build(file);

    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .map_err(|e| Error::file_unavailable(path, e.to_string()))?;

    if content.is_empty() {
        return Err(Error::file_unavailable(path, "file is empty"));
    }

    Ok(split_rows(&content))
}

/// Splits `content` on CRLF and drops rows that are exactly empty.
pub fn split_rows(content: &str) -> Vec<String> {
    content
        .split(ROW_SEPARATOR)
        .filter(|row| !row.is_empty())
        .map(str::to_string)
        .collect()
}
