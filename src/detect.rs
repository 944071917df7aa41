//! Input format detection.
//!
//! SpreadsheetML files are plain XML, so the checks here mostly exist to
//! turn "someone passed an .xlsx or .xls" into a clear error instead of an
//! XML parse failure deep inside the reader.

use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE2 compound file magic bytes (binary .xls).
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// SpreadsheetML 2003 namespace.
pub const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Processing instruction Excel writes at the top of SpreadsheetML files.
const MSO_APPLICATION_PI: &str = "progid=\"Excel.Sheet\"";

/// How far into the document to look for format markers.
const SNIFF_LEN: usize = 4096;

/// Detected input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Excel 2003 XML spreadsheet.
    SpreadsheetMl,
    /// XML without SpreadsheetML markers near the top.
    Xml,
    /// Office Open XML package (.xlsx and friends).
    Ooxml,
    /// OLE2 compound document (binary .xls).
    Ole,
}

impl FormatType {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::SpreadsheetMl => "SpreadsheetML 2003",
            FormatType::Xml => "XML",
            FormatType::Ooxml => "Office Open XML package",
            FormatType::Ole => "OLE compound document",
        }
    }

    /// Whether the reader can attempt this input.
    pub fn is_convertible(&self) -> bool {
        matches!(self, FormatType::SpreadsheetMl | FormatType::Xml)
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the format from the leading bytes of an input.
///
/// # Example
///
/// ```
/// use ssml2xlsx::detect::{detect_format_from_bytes, FormatType};
///
/// let xml = br#"<?mso-application progid="Excel.Sheet"?><Workbook/>"#;
/// assert_eq!(detect_format_from_bytes(xml)?, FormatType::SpreadsheetMl);
/// # Ok::<(), ssml2xlsx::Error>(())
/// ```
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if data.starts_with(&ZIP_MAGIC) {
        return Ok(FormatType::Ooxml);
    }
    if data.starts_with(&OLE_MAGIC) {
        return Ok(FormatType::Ole);
    }

    let head = sniff_text(&data[..data.len().min(SNIFF_LEN)]);
    if head.contains(SPREADSHEET_NS) || head.contains(MSO_APPLICATION_PI) {
        return Ok(FormatType::SpreadsheetMl);
    }
    let body = head.trim_start_matches(|c: char| {
        c.is_whitespace() || c == '\u{feff}' || c == '\u{fffd}'
    });
    if body.starts_with('<') {
        return Ok(FormatType::Xml);
    }

    Err(Error::UnsupportedFormat(
        "input does not look like an XML spreadsheet".to_string(),
    ))
}

/// Fail with a descriptive error for inputs the reader cannot handle.
pub fn ensure_convertible(format: FormatType) -> Result<()> {
    if format.is_convertible() {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat(format!(
            "input is an {}, not an XML spreadsheet",
            format.name()
        )))
    }
}

/// Lossy view of the leading bytes, skipping NULs so UTF-16 input still
/// exposes its ASCII markers.
fn sniff_text(head: &[u8]) -> String {
    let ascii: Vec<u8> = head.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&ascii).into_owned()
}
