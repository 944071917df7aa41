//! Error types for the ssml2xlsx library.

use std::io;
use thiserror::Error;

/// Result type alias for ssml2xlsx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is recognized but cannot be converted.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Two worksheets resolved to the same name and duplicates are rejected.
    #[error("Duplicate worksheet name: {0}")]
    DuplicateSheet(String),

    /// A header row repeats a column name and duplicates are rejected.
    #[error("Duplicate header '{header}' in worksheet '{sheet}'")]
    DuplicateHeader { sheet: String, header: String },

    /// Error while building or saving the output workbook.
    #[error("Write error: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Write(err.to_string())
    }
}
