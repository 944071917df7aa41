//! Normalized tables and output sheets.

use super::CellValue;
use serde::{Deserialize, Serialize};

/// A rectangular, type-coerced grid built from a worksheet's table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Kept rows, each exactly `width` values long
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,

    /// Column count shared by every row
    pub width: usize,
}

impl NormalizedTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row, widening the table if the row is longer than any so far.
    ///
    /// Rows are not padded here; call [`NormalizedTable::pad`] once all rows
    /// are in.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.width = self.width.max(row.len());
        self.rows.push(row);
    }

    /// Right-pad every row with empty strings up to `width`.
    pub fn pad(&mut self) {
        let width = self.width;
        for row in &mut self.rows {
            row.resize_with(width, CellValue::empty);
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A worksheet ready to be written: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSheet {
    /// Sheet name in the output workbook
    pub name: String,

    /// Column headers
    pub headers: Vec<String>,

    /// Data rows, each `headers.len()` values long
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl OutputSheet {
    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Ordered collection of output sheets keyed by name.
///
/// Inserting a name that already exists replaces that sheet's content but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputWorkbook {
    /// Sheets in first-seen order
    #[serde(default)]
    pub sheets: Vec<OutputSheet>,
}

impl OutputWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet; returns the replaced sheet when the name was taken.
    pub fn insert(&mut self, sheet: OutputSheet) -> Option<OutputSheet> {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => Some(std::mem::replace(existing, sheet)),
            None => {
                self.sheets.push(sheet);
                None
            }
        }
    }

    /// Whether a sheet with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    /// Sheet names in output order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Get the number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if no sheet qualified.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
