//! Cell value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a SpreadsheetML `Data` element (`ss:Type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// `String`, also used when the attribute is absent.
    #[default]
    String,
    /// `Number`
    Number,
    /// `DateTime`
    DateTime,
    /// Any other declared type (`Boolean`, `Error`, ...), kept verbatim.
    Other(String),
}

impl DataType {
    /// Map an `ss:Type` attribute value to a data type.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "String" => DataType::String,
            "Number" => DataType::Number,
            "DateTime" => DataType::DateTime,
            other => DataType::Other(other.to_string()),
        }
    }
}

/// A normalized cell value.
///
/// Numbers stay numeric until the write boundary so the output workbook
/// gets real numeric cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text content.
    Text(String),
    /// Floating-point number.
    Number(f64),
}

impl CellValue {
    /// The empty-string placeholder used for gaps and padding.
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Non-empty text or a non-zero number.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write_float(f, *n),
        }
    }
}

/// Shortest round-trip float text in the classic repr layout: integral
/// values keep a trailing `.0`, and magnitudes below `1e-4` or from `1e16`
/// up switch to exponent form with a signed two-digit exponent (`1e+16`).
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("nan");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "inf" } else { "-inf" });
    }
    if n == 0.0 {
        return write!(f, "{:.1}", n);
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if n.fract() == 0.0 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}
