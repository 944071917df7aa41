//! Output side of a conversion: header promotion, options, and the XLSX
//! writer.
//!
//! # Example
//!
//! ```no_run
//! use ssml2xlsx::model::{CellValue, OutputSheet, OutputWorkbook};
//! use ssml2xlsx::writer::{write_xlsx, ConvertOptions};
//!
//! let mut workbook = OutputWorkbook::new();
//! workbook.insert(OutputSheet {
//!     name: "Data".to_string(),
//!     headers: vec!["Name".to_string()],
//!     rows: vec![vec![CellValue::from("Alice")]],
//! });
//! write_xlsx(&workbook, "out.xlsx", &ConvertOptions::default())?;
//! # Ok::<(), ssml2xlsx::Error>(())
//! ```

mod builder;
mod options;
mod xlsx;

pub use builder::{add_sheet, build_sheet, header_name, placeholder_column_name};
pub use options::{ConvertOptions, DuplicateHeaderPolicy, DuplicateSheetPolicy};
pub use xlsx::{to_xlsx_bytes, write_xlsx};
