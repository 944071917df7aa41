//! SpreadsheetML (Excel 2003 XML) reading.
//!
//! # Example
//!
//! ```
//! use ssml2xlsx::spreadsheetml::{normalize_table, read_worksheets};
//!
//! let xml = r#"<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
//!     xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
//!   <Worksheet ss:Name="Data"><Table>
//!     <Row><Cell><Data ss:Type="String">A</Data></Cell>
//!          <Cell ss:Index="3"><Data ss:Type="String">C</Data></Cell></Row>
//!   </Table></Worksheet>
//! </Workbook>"#;
//!
//! let sheets = read_worksheets(xml)?;
//! let table = normalize_table(sheets[0].table.as_deref().unwrap_or_default());
//! assert_eq!(table.width, 3);
//! # Ok::<(), ssml2xlsx::Error>(())
//! ```

mod normalize;
mod reader;

pub use normalize::{coerce, expand_row, normalize_table};
pub use reader::read_worksheets;
