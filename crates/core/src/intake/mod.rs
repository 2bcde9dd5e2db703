//! File intake.
//!
//! Accepts one selected file, checks its extension and parses it into a
//! [`ParsedTable`]. The table only gates readiness: no displayed figure is
//! computed from it.

pub mod error;

use error::{IntakeError, IntakeResult};
use sk_protocol::table_models::ParsedTable;
use std::collections::HashMap;
use std::path::Path;

/// Required suffix of an accepted file name. Matched case-sensitively.
pub const CSV_EXTENSION: &str = ".csv";

/// An accepted file: its parsed table and its size on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub table: ParsedTable,
    pub size_bytes: u64,
}

/// Name shown for a path, lossily converted to UTF-8.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Read and parse a selected file.
///
/// # Errors
///
/// - [`IntakeError::UnsupportedExtension`] when the name does not end in `.csv`
/// - [`IntakeError::Read`] when the file cannot be read
///
/// Bytes that are not valid UTF-8 are replaced, never rejected.
pub async fn select_file(path: &Path) -> IntakeResult<SelectedFile> {
    let file_name = display_name(path);
    if !file_name.ends_with(CSV_EXTENSION) {
        return Err(IntakeError::UnsupportedExtension { file_name });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IntakeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(SelectedFile {
        table: parse_csv(&String::from_utf8_lossy(&bytes)),
        size_bytes: bytes.len() as u64,
    })
}

/// Naive comma-split parser.
///
/// The first line holds the headers; every following line is zipped with
/// them by position. Quoting is not supported. A row shorter than the
/// headers lacks the trailing keys, extra values are dropped, and for a
/// repeated header the rightmost value wins. A leading byte-order mark is
/// ignored.
pub fn parse_csv(text: &str) -> ParsedTable {
    let text = text.trim_start_matches('\u{feff}').trim();
    if text.is_empty() {
        return ParsedTable::default();
    }

    let mut lines = text.split('\n');
    let headers: Vec<String> = lines
        .next()
        .map(split_fields)
        .unwrap_or_default();

    let rows = lines
        .map(|line| {
            headers
                .iter()
                .zip(split_fields(line))
                .map(|(header, value)| (header.clone(), value))
                .collect::<HashMap<_, _>>()
        })
        .collect();

    ParsedTable { headers, rows }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}
