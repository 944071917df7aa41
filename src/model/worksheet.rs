//! Raw worksheet structures as read from the source document.

use super::DataType;
use serde::{Deserialize, Serialize};

/// Name given to worksheets without an `ss:Name`.
pub const DEFAULT_SHEET_NAME: &str = "Sheet";

/// Resolve a worksheet's declared name, defaulting when missing or blank.
pub fn default_sheet_name(declared: Option<&str>) -> String {
    match declared {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_SHEET_NAME.to_string(),
    }
}

/// The `Data` element of a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawData {
    /// Declared `ss:Type`
    #[serde(default)]
    pub data_type: DataType,

    /// Text content (empty when the element has none)
    #[serde(default)]
    pub text: String,
}

impl RawData {
    /// Create a data element.
    pub fn new(data_type: DataType, text: impl Into<String>) -> Self {
        Self {
            data_type,
            text: text.into(),
        }
    }
}

/// A `Cell` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    /// Explicit 1-based column (`ss:Index`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,

    /// Nested value, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RawData>,
}

impl RawCell {
    /// A cell with a string value and no explicit index.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            index: None,
            data: Some(RawData::new(DataType::String, text)),
        }
    }

    /// A cell with a value of the given declared type.
    pub fn typed(data_type: DataType, text: impl Into<String>) -> Self {
        Self {
            index: None,
            data: Some(RawData::new(data_type, text)),
        }
    }

    /// Set the explicit 1-based column.
    pub fn at(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }
}

/// A `Row` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Cells in source order
    #[serde(default)]
    pub cells: Vec<RawCell>,
}

impl RawRow {
    /// Create a row from cells.
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }
}

/// A `Worksheet` element with its first `Table`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorksheet {
    /// Resolved sheet name
    pub name: String,

    /// Rows of the table, `None` when the worksheet has no table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<RawRow>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_name() {
        assert_eq!(default_sheet_name(Some("Data")), "Data");
        assert_eq!(default_sheet_name(None), "Sheet");
        assert_eq!(default_sheet_name(Some("")), "Sheet");
    }

    #[test]
    fn test_cell_builders() {
        let cell = RawCell::typed(DataType::Number, "30").at(4);
        assert_eq!(cell.index, Some(4));
        assert_eq!(cell.data.unwrap().data_type, DataType::Number);
    }
}
