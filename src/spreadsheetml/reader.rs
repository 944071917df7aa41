//! Structural reader for SpreadsheetML documents.
//!
//! Walks `Workbook/Worksheet/Table/Row/Cell/Data` with a namespace-aware
//! pull parser and produces one [`RawWorksheet`] per `Worksheet` element.
//! Elements and the `Name`, `Index` and `Type` attributes only count when
//! they resolve to the SpreadsheetML namespace.

use crate::detect::SPREADSHEET_NS;
use crate::error::{Error, Result};
use crate::model::{default_sheet_name, DataType, RawCell, RawData, RawRow, RawWorksheet};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use tracing::debug;

/// SpreadsheetML elements the reader cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Worksheet,
    Table,
    Row,
    Cell,
    Data,
    Other,
}

impl Tag {
    fn from_local(name: &[u8]) -> Self {
        match name {
            b"Worksheet" => Tag::Worksheet,
            b"Table" => Tag::Table,
            b"Row" => Tag::Row,
            b"Cell" => Tag::Cell,
            b"Data" => Tag::Data,
            _ => Tag::Other,
        }
    }

    /// The SpreadsheetML attribute this element contributes, if any.
    fn attribute(&self) -> Option<&'static [u8]> {
        match self {
            Tag::Worksheet => Some(b"Name"),
            Tag::Cell => Some(b"Index"),
            Tag::Data => Some(b"Type"),
            _ => None,
        }
    }
}

fn is_spreadsheet_ns(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SPREADSHEET_NS.as_bytes())
}

/// A worksheet whose end tag has not been seen yet.
struct OpenSheet {
    depth: usize,
    name: String,
    table: Option<Vec<RawRow>>,
    /// Depth of the table element while it is open.
    table_depth: Option<usize>,
}

/// Tracks open elements while the document is streamed.
///
/// Every open element is recorded with its depth, so a closing tag is
/// matched by depth alone.
#[derive(Default)]
struct Walker {
    worksheets: Vec<RawWorksheet>,
    depth: usize,
    seen_root: bool,
    sheet: Option<OpenSheet>,
    row: Option<(usize, RawRow)>,
    cell: Option<(usize, RawCell)>,
    data: Option<(usize, RawData)>,
}

impl Walker {
    fn start(&mut self, tag: Tag, attr: Option<String>) -> Result<()> {
        self.seen_root = true;
        let depth = self.depth;
        self.depth += 1;
        self.open(tag, depth, attr)
    }

    fn end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.close(self.depth);
    }

    fn empty(&mut self, tag: Tag, attr: Option<String>) -> Result<()> {
        self.seen_root = true;
        self.open(tag, self.depth, attr)?;
        self.close(self.depth);
        Ok(())
    }

    fn open(&mut self, tag: Tag, depth: usize, attr: Option<String>) -> Result<()> {
        match tag {
            Tag::Worksheet if self.sheet.is_none() => {
                self.sheet = Some(OpenSheet {
                    depth,
                    name: default_sheet_name(attr.as_deref()),
                    table: None,
                    table_depth: None,
                });
            }
            Tag::Table => {
                // Only the first table of a worksheet is read.
                if let Some(sheet) = self.sheet.as_mut() {
                    if sheet.table.is_none() {
                        sheet.table = Some(Vec::new());
                        sheet.table_depth = Some(depth);
                    }
                }
            }
            Tag::Row if self.in_table() && self.row.is_none() => {
                self.row = Some((depth, RawRow::default()));
            }
            Tag::Cell if self.row.is_some() && self.cell.is_none() => {
                let index = parse_index(attr.as_deref())?;
                self.cell = Some((depth, RawCell { index, data: None }));
            }
            Tag::Data if self.data.is_none() => {
                // Only a direct child counts; Comment elements carry their own Data.
                if let Some((cell_depth, cell)) = &self.cell {
                    if depth == cell_depth + 1 && cell.data.is_none() {
                        let data_type = attr
                            .as_deref()
                            .map(DataType::from_attr)
                            .unwrap_or_default();
                        self.data = Some((depth, RawData::new(data_type, String::new())));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, depth: usize) {
        if matches!(self.data, Some((d, _)) if d == depth) {
            if let (Some((_, data)), Some((_, cell))) = (self.data.take(), self.cell.as_mut()) {
                cell.data = Some(data);
            }
        } else if matches!(self.cell, Some((d, _)) if d == depth) {
            if let (Some((_, cell)), Some((_, row))) = (self.cell.take(), self.row.as_mut()) {
                row.cells.push(cell);
            }
        } else if matches!(self.row, Some((d, _)) if d == depth) {
            if let (Some((_, row)), Some(sheet)) = (self.row.take(), self.sheet.as_mut()) {
                if let Some(rows) = sheet.table.as_mut() {
                    rows.push(row);
                }
            }
        } else if self
            .sheet
            .as_ref()
            .is_some_and(|sheet| sheet.table_depth == Some(depth))
        {
            if let Some(sheet) = self.sheet.as_mut() {
                sheet.table_depth = None;
            }
        } else if self.sheet.as_ref().is_some_and(|sheet| sheet.depth == depth) {
            if let Some(sheet) = self.sheet.take() {
                debug!(
                    sheet = %sheet.name,
                    rows = ?sheet.table.as_ref().map(Vec::len),
                    "read worksheet"
                );
                self.worksheets.push(RawWorksheet {
                    name: sheet.name,
                    table: sheet.table,
                });
            }
        }
    }

    fn in_table(&self) -> bool {
        self.sheet
            .as_ref()
            .is_some_and(|sheet| sheet.table_depth.is_some())
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, data)) = self.data.as_mut() {
            data.text.push_str(text);
        }
    }

    fn collecting_text(&self) -> bool {
        self.data.is_some()
    }

    fn finish(self) -> Result<Vec<RawWorksheet>> {
        if !self.seen_root {
            return Err(Error::XmlParse("no root element found".to_string()));
        }
        if self.depth != 0 {
            return Err(Error::XmlParse(
                "unexpected end of document: unclosed elements".to_string(),
            ));
        }
        Ok(self.worksheets)
    }
}

/// Widest row an XLSX worksheet can hold.
const MAX_COLUMNS: i64 = 16_384;

/// Parse an `ss:Index` value. Empty values count as absent.
///
/// Indices beyond the XLSX column limit are rejected here, before the
/// normalizer would fill the gap with empty cells.
fn parse_index(raw: Option<&str>) -> Result<Option<i64>> {
    let value = match raw {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };
    let index = value
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidData(format!("invalid cell index '{}'", value)))?;
    if index > MAX_COLUMNS {
        return Err(Error::InvalidData(format!(
            "cell index {} exceeds the {} column limit",
            index, MAX_COLUMNS
        )));
    }
    Ok(Some(index))
}

/// Look up a SpreadsheetML-qualified attribute on an element.
fn spreadsheet_attr(
    reader: &NsReader<&[u8]>,
    element: &BytesStart,
    local: &[u8],
) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        let (ns, name) = reader.resolve_attribute(attr.key);
        if is_spreadsheet_ns(&ns) && name.as_ref() == local {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Read every worksheet of a SpreadsheetML document.
///
/// Worksheets without a `Table` are returned with `table: None`; callers
/// skip them.
///
/// # Example
///
/// ```
/// use ssml2xlsx::spreadsheetml::read_worksheets;
///
/// let xml = r#"<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
///     xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
///   <Worksheet ss:Name="Data"><Table>
///     <Row><Cell><Data ss:Type="String">Name</Data></Cell></Row>
///   </Table></Worksheet>
/// </Workbook>"#;
///
/// let sheets = read_worksheets(xml)?;
/// assert_eq!(sheets[0].name, "Data");
/// assert_eq!(sheets[0].table.as_ref().unwrap().len(), 1);
/// # Ok::<(), ssml2xlsx::Error>(())
/// ```
pub fn read_worksheets(xml: &str) -> Result<Vec<RawWorksheet>> {
    let mut reader = NsReader::from_str(xml);
    let mut walker = Walker::default();

    loop {
        let (in_ns, event) = {
            let (ns, event) = reader.read_resolved_event()?;
            (is_spreadsheet_ns(&ns), event)
        };

        match event {
            Event::Start(e) => {
                let tag = element_tag(in_ns, &e);
                let attr = element_attr(&reader, tag, &e)?;
                walker.start(tag, attr)?;
            }
            Event::Empty(e) => {
                let tag = element_tag(in_ns, &e);
                let attr = element_attr(&reader, tag, &e)?;
                walker.empty(tag, attr)?;
            }
            Event::End(_) => walker.end(),
            Event::Text(e) if walker.collecting_text() => {
                walker.push_text(&e.unescape()?);
            }
            Event::CData(e) if walker.collecting_text() => {
                walker.push_text(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    walker.finish()
}

fn element_tag(in_ns: bool, element: &BytesStart) -> Tag {
    if in_ns {
        Tag::from_local(element.local_name().as_ref())
    } else {
        Tag::Other
    }
}

fn element_attr(
    reader: &NsReader<&[u8]>,
    tag: Tag,
    element: &BytesStart,
) -> Result<Option<String>> {
    match tag.attribute() {
        Some(local) => spreadsheet_attr(reader, element, local),
        None => Ok(None),
    }
}
