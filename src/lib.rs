//! # ssml2xlsx
//!
//! Convert legacy SpreadsheetML (Excel 2003 XML) workbooks to XLSX.
//!
//! Each `Worksheet` with a `Table` is read row by row, sparse `ss:Index`
//! cells are expanded, `Number` and `DateTime` values are coerced, blank
//! rows are dropped and the grid is padded to a rectangle. The first row
//! becomes the header; worksheets with at least one data row are written
//! as sheets of a single `.xlsx` file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ssml2xlsx::{convert_file, Conversion, ConvertOptions};
//!
//! match convert_file("legacy.xml", "modern.xlsx", &ConvertOptions::default())? {
//!     Conversion::Written(report) => println!("{} sheets", report.sheets.len()),
//!     Conversion::NoData => println!("nothing to convert"),
//! }
//! # Ok::<(), ssml2xlsx::Error>(())
//! ```
//!
//! ## Stages
//!
//! ```
//! use ssml2xlsx::{read_workbook, ConvertOptions};
//!
//! let xml = br#"<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
//!     xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
//!   <Worksheet ss:Name="Data"><Table>
//!     <Row><Cell><Data ss:Type="String">Name</Data></Cell>
//!          <Cell><Data ss:Type="String">Age</Data></Cell></Row>
//!     <Row><Cell><Data ss:Type="String">Alice</Data></Cell>
//!          <Cell><Data ss:Type="Number">30</Data></Cell></Row>
//!   </Table></Worksheet>
//! </Workbook>"#;
//!
//! let workbook = read_workbook(xml, &ConvertOptions::default())?;
//! assert_eq!(workbook.sheets[0].headers, vec!["Name", "Age"]);
//! # Ok::<(), ssml2xlsx::Error>(())
//! ```

pub mod detect;
pub mod error;
pub mod model;
pub mod source;
pub mod spreadsheetml;
pub mod writer;

// Re-exports
pub use detect::{detect_format_from_bytes, FormatType};
pub use error::{Error, Result};
pub use model::{CellValue, DataType, NormalizedTable, OutputSheet, OutputWorkbook};
pub use source::SourceDocument;
pub use writer::{ConvertOptions, DuplicateHeaderPolicy, DuplicateSheetPolicy};

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Summary of one written sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    /// Sheet name
    pub name: String,
    /// Number of columns
    pub columns: usize,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

impl From<&OutputSheet> for SheetSummary {
    fn from(sheet: &OutputSheet) -> Self {
        Self {
            name: sheet.name.clone(),
            columns: sheet.column_count(),
            rows: sheet.row_count(),
        }
    }
}

/// Report of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Source SpreadsheetML file
    pub input: PathBuf,
    /// Written XLSX file
    pub output: PathBuf,
    /// Written sheets in workbook order
    pub sheets: Vec<SheetSummary>,
}

impl ConversionReport {
    /// Render the report as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| Error::InvalidData(e.to_string()))
    }
}

/// Outcome of a conversion that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// At least one sheet was written.
    Written(ConversionReport),
    /// No worksheet had a header and a data row; nothing was written.
    NoData,
}

impl Conversion {
    /// Whether an output file was produced.
    pub fn is_written(&self) -> bool {
        matches!(self, Conversion::Written(_))
    }
}

/// Read SpreadsheetML bytes into output sheets.
///
/// Runs detection, decoding, the structural reader, the row normalizer and
/// header promotion. Worksheets without a table or with fewer than two
/// non-blank rows are left out.
pub fn read_workbook(data: &[u8], options: &ConvertOptions) -> Result<OutputWorkbook> {
    let source = SourceDocument::from_bytes(data)?;
    read_document(&source, options)
}

/// Read an already decoded document into output sheets.
pub fn read_document(source: &SourceDocument, options: &ConvertOptions) -> Result<OutputWorkbook> {
    let worksheets = spreadsheetml::read_worksheets(source.xml())?;
    debug!(format = %source.format(), worksheets = worksheets.len(), "read worksheets");

    let mut workbook = OutputWorkbook::new();
    for worksheet in worksheets {
        let Some(rows) = worksheet.table else {
            continue;
        };

        let table = spreadsheetml::normalize_table(&rows);
        debug!(
            sheet = %worksheet.name,
            rows = table.row_count(),
            width = table.width,
            "normalized table"
        );

        if let Some(sheet) = writer::build_sheet(worksheet.name, table) {
            writer::add_sheet(&mut workbook, sheet, options)?;
        }
    }

    Ok(workbook)
}

/// Convert SpreadsheetML bytes to XLSX bytes.
///
/// Returns `None` when no worksheet qualifies.
pub fn convert_bytes(data: &[u8], options: &ConvertOptions) -> Result<Option<Vec<u8>>> {
    let workbook = read_workbook(data, options)?;
    if workbook.is_empty() {
        return Ok(None);
    }
    writer::to_xlsx_bytes(&workbook, options).map(Some)
}

/// Convert a SpreadsheetML file to an XLSX file.
///
/// Nothing is written when no worksheet qualifies; the result is then
/// [`Conversion::NoData`].
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = SourceDocument::open(input)?;
    let workbook = read_document(&source, options)?;
    if workbook.is_empty() {
        return Ok(Conversion::NoData);
    }
    debug!(sheets = ?workbook.sheet_names(), "assembled workbook");

    writer::write_xlsx(&workbook, output, options)?;

    Ok(Conversion::Written(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        sheets: workbook.sheets.iter().map(SheetSummary::from).collect(),
    }))
}
