//! Loading and decoding of SpreadsheetML source documents.

use crate::detect::{self, FormatType};
use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// How far into the document the XML declaration may extend.
const DECLARATION_LIMIT: usize = 1024;

/// A decoded SpreadsheetML document held in memory for one conversion.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    format: FormatType,
    xml: String,
}

impl SourceDocument {
    /// Read and decode a document from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ssml2xlsx::source::SourceDocument;
    ///
    /// let doc = SourceDocument::open("report.xml")?;
    /// println!("{} bytes of XML", doc.xml().len());
    /// # Ok::<(), ssml2xlsx::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Detect and decode a document from raw bytes.
    ///
    /// Packages (`.xlsx`, binary `.xls`) and non-XML input are rejected
    /// before any decoding happens.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = detect::detect_format_from_bytes(data)?;
        detect::ensure_convertible(format)?;
        debug!(%format, bytes = data.len(), "detected input");

        let xml = decode_xml_bytes(data)?;
        Ok(Self { format, xml })
    }

    /// The detected input format.
    pub fn format(&self) -> FormatType {
        self.format
    }

    /// The decoded XML text.
    pub fn xml(&self) -> &str {
        &self.xml
    }
}

/// Decode XML bytes to a UTF-8 string.
///
/// A byte order mark wins, then BOM-less UTF-16 is recognised by its zero
/// bytes, then the `encoding` label of the XML declaration is honoured
/// (`ISO-8859-1`, `windows-1252`, `Shift_JIS`, ...). Without any of these
/// the input is UTF-8. When the text was transcoded, the declaration is
/// rewritten to say UTF-8 so the parser does not re-interpret it.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let (encoding, body) = sniff_encoding(bytes)?;
    let (text, malformed) = encoding.decode_without_bom_handling(body);
    if malformed {
        return Err(Error::Encoding(format!(
            "input is not valid {}",
            encoding.name()
        )));
    }
    debug!(encoding = encoding.name(), "decoded source");

    if encoding == UTF_8 {
        Ok(text.into_owned())
    } else {
        Ok(rewrite_declared_encoding(&text))
    }
}

fn sniff_encoding(bytes: &[u8]) -> Result<(&'static Encoding, &[u8])> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return Ok((encoding, &bytes[bom_len..]));
    }

    // BOM-less UTF-16: leading ASCII characters pair with a zero byte.
    if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
        return Ok((UTF_16LE, bytes));
    }
    if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
        return Ok((UTF_16BE, bytes));
    }

    let Some(label) = declared_label(bytes) else {
        return Ok((UTF_8, bytes));
    };
    match Encoding::for_label(&bytes[label.clone()]) {
        // The declaration was readable byte by byte, so the text is not UTF-16.
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok((UTF_8, bytes)),
        Some(encoding) => Ok((encoding, bytes)),
        None => Err(Error::Encoding(format!(
            "unsupported encoding {:?}",
            String::from_utf8_lossy(&bytes[label])
        ))),
    }
}

/// Byte range of the `encoding` label inside a leading XML declaration.
fn declared_label(bytes: &[u8]) -> Option<Range<usize>> {
    if !bytes.starts_with(b"<?xml") {
        return None;
    }
    let head = &bytes[..bytes.len().min(DECLARATION_LIMIT)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = &head[..end];

    let mut pos = decl.windows(8).position(|w| w == b"encoding")? + 8;
    while decl.get(pos)?.is_ascii_whitespace() {
        pos += 1;
    }
    if *decl.get(pos)? != b'=' {
        return None;
    }
    pos += 1;
    while decl.get(pos)?.is_ascii_whitespace() {
        pos += 1;
    }

    let quote = *decl.get(pos)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let start = pos + 1;
    let len = decl.get(start..)?.iter().position(|&b| b == quote)?;
    Some(start..start + len)
}

/// Replace the encoding label in the XML declaration with UTF-8.
fn rewrite_declared_encoding(content: &str) -> String {
    match declared_label(content.as_bytes()) {
        Some(label) => {
            let mut fixed = String::with_capacity(content.len());
            fixed.push_str(&content[..label.start]);
            fixed.push_str("UTF-8");
            fixed.push_str(&content[label.end..]);
            fixed
        }
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_plain_and_bom() {
        assert_eq!(decode_xml_bytes(b"<Workbook/>").unwrap(), "<Workbook/>");
        assert_eq!(
            decode_xml_bytes(b"\xEF\xBB\xBF<Workbook/>").unwrap(),
            "<Workbook/>"
        );
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let le = b"\xFF\xFE<\0a\0/\0>\0";
        assert_eq!(decode_xml_bytes(le).unwrap(), "<a/>");

        let be = b"\xFE\xFF\0<\0a\0/\0>";
        assert_eq!(decode_xml_bytes(be).unwrap(), "<a/>");
    }

    #[test]
    fn test_decode_utf16_without_bom() {
        let le: Vec<u8> = "<a>x</a>"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        assert_eq!(decode_xml_bytes(&le).unwrap(), "<a>x</a>");
    }

    #[test]
    fn test_declaration_rewritten_after_transcoding() {
        let text = r#"<?xml version="1.0" encoding="UTF-16"?><a/>"#;
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(text.encode_utf16().flat_map(|u| u.to_le_bytes()));

        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert_eq!(decoded, r#"<?xml version="1.0" encoding="UTF-8"?><a/>"#);
    }

    #[test]
    fn test_decode_declared_latin1() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a>Montr\xE9al</a>";
        assert_eq!(
            decode_xml_bytes(bytes).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8"?><a>Montréal</a>"#
        );
    }

    #[test]
    fn test_decode_declared_windows_1252_single_quotes() {
        let bytes = b"<?xml version='1.0' encoding = 'windows-1252'?><a>\x80 5</a>";
        assert_eq!(
            decode_xml_bytes(bytes).unwrap(),
            "<?xml version='1.0' encoding = 'UTF-8'?><a>€ 5</a>"
        );
    }

    #[test]
    fn test_utf16_label_on_single_byte_text_reads_as_utf8() {
        let text = r#"<?xml version="1.0" encoding="UTF-16"?><a>é</a>"#;
        assert_eq!(decode_xml_bytes(text.as_bytes()).unwrap(), text);
    }

    #[test]
    fn test_unknown_encoding_label() {
        let err = decode_xml_bytes(br#"<?xml version="1.0" encoding="x-made-up"?><a/>"#)
            .unwrap_err();
        assert!(matches!(err, Error::Encoding(msg) if msg.contains("x-made-up")));
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let err = decode_xml_bytes(b"<a>\xC3\x28</a>").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_from_bytes_rejects_packages() {
        let err = SourceDocument::from_bytes(b"PK\x03\x04....").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_open_detects_and_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xml");
        std::fs::write(
            &path,
            r#"<?mso-application progid="Excel.Sheet"?><Workbook/>"#,
        )
        .unwrap();

        let doc = SourceDocument::open(&path).unwrap();
        assert_eq!(doc.format(), FormatType::SpreadsheetMl);
        assert!(doc.xml().ends_with("<Workbook/>"));
    }

    #[test]
    fn test_open_missing_file() {
        let err = SourceDocument::open("definitely/not/here.xml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
