//! Header promotion and workbook assembly.

use super::options::{ConvertOptions, DuplicateHeaderPolicy, DuplicateSheetPolicy};
use crate::error::{Error, Result};
use crate::model::{CellValue, NormalizedTable, OutputSheet, OutputWorkbook};
use std::collections::HashSet;
use tracing::debug;

/// Positional name for a blank header: `Column1`, `Column2`, ...
pub fn placeholder_column_name(position: usize) -> String {
    format!("Column{}", position + 1)
}

/// Header text for the value at a 0-based position.
pub fn header_name(position: usize, value: &CellValue) -> String {
    if value.is_truthy() {
        value.to_string()
    } else {
        placeholder_column_name(position)
    }
}

/// Promote a normalized table's first row to headers.
///
/// Returns `None` unless the table has a header row and at least one data
/// row.
pub fn build_sheet(name: impl Into<String>, table: NormalizedTable) -> Option<OutputSheet> {
    if table.row_count() < 2 {
        return None;
    }

    let mut rows = table.rows.into_iter();
    let headers = rows
        .next()?
        .iter()
        .enumerate()
        .map(|(i, value)| header_name(i, value))
        .collect();

    Some(OutputSheet {
        name: name.into(),
        headers,
        rows: rows.collect(),
    })
}

/// First header that appears more than once, if any.
fn duplicate_header(headers: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .find(|h| !seen.insert(h.as_str()))
        .map(String::as_str)
}

/// Add a sheet to the workbook, applying the configured duplicate policies.
pub fn add_sheet(
    workbook: &mut OutputWorkbook,
    sheet: OutputSheet,
    options: &ConvertOptions,
) -> Result<()> {
    if options.duplicate_headers == DuplicateHeaderPolicy::Error {
        if let Some(header) = duplicate_header(&sheet.headers) {
            return Err(Error::DuplicateHeader {
                sheet: sheet.name.clone(),
                header: header.to_string(),
            });
        }
    }

    if workbook.contains(&sheet.name) {
        if options.duplicate_sheets == DuplicateSheetPolicy::Error {
            return Err(Error::DuplicateSheet(sheet.name));
        }
        debug!(sheet = %sheet.name, "replacing worksheet with the same name");
    }

    workbook.insert(sheet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<CellValue>>) -> NormalizedTable {
        let mut t = NormalizedTable::new();
        for row in rows {
            t.push_row(row);
        }
        t.pad();
        t
    }

    #[test]
    fn test_placeholder_headers() {
        let t = table(vec![
            vec!["".into(), "City".into()],
            vec!["x".into(), "Paris".into()],
        ]);
        let sheet = build_sheet("S", t).unwrap();
        assert_eq!(sheet.headers, vec!["Column1", "City"]);
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn test_numeric_headers() {
        assert_eq!(header_name(0, &CellValue::Number(2024.0)), "2024.0");
        assert_eq!(header_name(2, &CellValue::Number(0.0)), "Column3");
        assert_eq!(header_name(1, &" ".into()), " ");
    }

    #[test]
    fn test_single_row_table_is_dropped() {
        let t = table(vec![vec!["only".into()]]);
        assert!(build_sheet("S", t).is_none());
        assert!(build_sheet("S", NormalizedTable::new()).is_none());
    }

    #[test]
    fn test_duplicate_headers_pass_through_by_default() {
        let t = table(vec![
            vec!["A".into(), "A".into()],
            vec!["1".into(), "2".into()],
        ]);
        let sheet = build_sheet("S", t).unwrap();
        let mut wb = OutputWorkbook::new();
        add_sheet(&mut wb, sheet.clone(), &ConvertOptions::default()).unwrap();
        assert_eq!(wb.sheets[0].headers, vec!["A", "A"]);

        let err = add_sheet(&mut OutputWorkbook::new(), sheet, &ConvertOptions::strict())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateHeader { .. }));
    }

    #[test]
    fn test_duplicate_sheet_policy() {
        let sheet = |h: &str| OutputSheet {
            name: "Data".to_string(),
            headers: vec![h.to_string()],
            rows: vec![vec!["v".into()]],
        };

        let mut wb = OutputWorkbook::new();
        let opts = ConvertOptions::default();
        add_sheet(&mut wb, sheet("first"), &opts).unwrap();
        add_sheet(&mut wb, sheet("second"), &opts).unwrap();
        assert_eq!(wb.len(), 1);
        assert_eq!(wb.sheets[0].headers, vec!["second"]);

        let strict = ConvertOptions::strict();
        let err = add_sheet(&mut wb, sheet("third"), &strict).unwrap_err();
        assert!(matches!(err, Error::DuplicateSheet(name) if name == "Data"));
    }
}
