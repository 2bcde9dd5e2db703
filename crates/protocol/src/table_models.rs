//! Tabular data produced by file intake.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

/// A CSV file split into its header line and positional rows.
///
/// Rows are mappings from header to value. A row with fewer values than
/// headers has no entry for the missing headers; surplus values are dropped.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl ParsedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value of `header` in row `row`, if that row has one.
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(header))
            .map(String::as_str)
    }
}
