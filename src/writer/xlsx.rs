//! XLSX output using rust_xlsxwriter.

use super::options::ConvertOptions;
use crate::error::{Error, Result};
use crate::model::{CellValue, OutputSheet, OutputWorkbook};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// Write the workbook to an `.xlsx` file.
///
/// The whole workbook is assembled in memory first, so a sheet that fails
/// to build leaves no file behind.
pub fn write_xlsx(
    workbook: &OutputWorkbook,
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<()> {
    let path = path.as_ref();
    let mut xlsx = build_workbook(workbook, options)?;
    xlsx.save(path)?;
    info!(sheets = workbook.len(), path = %path.display(), "saved workbook");
    Ok(())
}

/// Serialize the workbook to `.xlsx` bytes.
pub fn to_xlsx_bytes(workbook: &OutputWorkbook, options: &ConvertOptions) -> Result<Vec<u8>> {
    let mut xlsx = build_workbook(workbook, options)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook(workbook: &OutputWorkbook, options: &ConvertOptions) -> Result<Workbook> {
    let mut xlsx = Workbook::new();
    let header_format = options.bold_headers.then(header_style);

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;
        write_sheet(worksheet, sheet, header_format.as_ref())?;
    }

    Ok(xlsx)
}

/// Header cell style: bold, thin border, centred, top-aligned.
fn header_style() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Top)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &OutputSheet,
    header_format: Option<&Format>,
) -> Result<()> {
    for (col, header) in sheet.headers.iter().enumerate() {
        let col = column_number(col)?;
        match header_format {
            Some(format) => worksheet.write_string_with_format(0, col, header.as_str(), format)?,
            None => worksheet.write_string(0, col, header.as_str())?,
        };
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let row_num = u32::try_from(i + 1)
            .map_err(|_| Error::Write(format!("too many rows in worksheet '{}'", sheet.name)))?;
        for (col, value) in row.iter().enumerate() {
            let col = column_number(col)?;
            match value {
                CellValue::Text(text) if text.is_empty() => {}
                CellValue::Text(text) => {
                    worksheet.write_string(row_num, col, text.as_str())?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
            }
        }
    }

    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Write(format!("column {} is out of range", col + 1)))
}
