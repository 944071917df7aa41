//! Row normalization: sparse-index expansion, type coercion, empty-row
//! filtering and padding.

use crate::model::{CellValue, DataType, NormalizedTable, RawCell, RawRow};

/// Time-of-day suffix that marks a date-only `DateTime` value.
const MIDNIGHT: &str = "T00:00:00";

/// Coerce a cell's text according to its declared type.
///
/// Never fails: numbers that cannot be parsed become `0.0`.
///
/// # Example
///
/// ```
/// use ssml2xlsx::model::{CellValue, DataType};
/// use ssml2xlsx::spreadsheetml::coerce;
///
/// assert_eq!(coerce(&DataType::Number, "30"), CellValue::Number(30.0));
/// assert_eq!(coerce(&DataType::Number, "n/a"), CellValue::Number(0.0));
/// assert_eq!(
///     coerce(&DataType::DateTime, "2024-01-05T00:00:00"),
///     CellValue::from("2024-01-05")
/// );
/// ```
pub fn coerce(data_type: &DataType, text: &str) -> CellValue {
    match data_type {
        DataType::Number => CellValue::Number(parse_number(text)),
        DataType::DateTime if text.contains(MIDNIGHT) => {
            let date = text.split('T').next().unwrap_or_default();
            CellValue::Text(date.to_string())
        }
        _ => CellValue::Text(text.to_string()),
    }
}

fn parse_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Rendered value of a single cell; a cell without `Data` is an empty string.
fn cell_value(cell: &RawCell) -> CellValue {
    match &cell.data {
        Some(data) => coerce(&data.data_type, &data.text),
        None => CellValue::empty(),
    }
}

/// Expand a row's sparse cells into positional values.
///
/// A cell at 1-based index `P` is preceded by empty strings until the row
/// holds `P - 1` values. Every cell then advances the row by exactly one,
/// so an index at or behind the current position inserts nothing.
pub fn expand_row(row: &RawRow) -> Vec<CellValue> {
    let mut values = Vec::with_capacity(row.cells.len());

    for cell in &row.cells {
        if let Some(index) = cell.index {
            let target = index.saturating_sub(1);
            while (values.len() as i64) < target {
                values.push(CellValue::empty());
            }
        }
        values.push(cell_value(cell));
    }

    values
}

/// Build the rectangular grid for a table's rows.
///
/// Rows without a truthy value are dropped and do not count toward the
/// width; the remaining rows are right-padded to the widest one.
pub fn normalize_table(rows: &[RawRow]) -> NormalizedTable {
    let mut table = NormalizedTable::new();

    for row in rows {
        let values = expand_row(row);
        if values.iter().any(CellValue::is_truthy) {
            table.push_row(values);
        }
    }

    table.pad();
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce(&DataType::Number, "30"), CellValue::Number(30.0));
        assert_eq!(coerce(&DataType::Number, " 2.5e1 "), CellValue::Number(25.0));
        assert_eq!(coerce(&DataType::Number, ""), CellValue::Number(0.0));
        assert_eq!(coerce(&DataType::Number, "abc"), CellValue::Number(0.0));
        assert_eq!(coerce(&DataType::Number, "inf"), CellValue::Number(0.0));
    }

    #[test]
    fn test_datetime_coercion() {
        assert_eq!(
            coerce(&DataType::DateTime, "2024-01-05T00:00:00"),
            text("2024-01-05")
        );
        assert_eq!(
            coerce(&DataType::DateTime, "2024-01-05T00:00:00.000"),
            text("2024-01-05")
        );
        assert_eq!(
            coerce(&DataType::DateTime, "2024-01-05T08:30:00"),
            text("2024-01-05T08:30:00")
        );
    }

    #[test]
    fn test_other_types_pass_through() {
        assert_eq!(coerce(&DataType::String, " x "), text(" x "));
        assert_eq!(
            coerce(&DataType::Other("Boolean".to_string()), "1"),
            text("1")
        );
    }

    #[test]
    fn test_expand_row_fills_gaps() {
        // Running count 1, index 4: 4 - 1 - 1 = 2 placeholders.
        let row = RawRow::new(vec![
            RawCell::text("a"),
            RawCell::text("d").at(4),
            RawCell::text("e"),
        ]);
        assert_eq!(
            expand_row(&row),
            vec![text("a"), text(""), text(""), text("d"), text("e")]
        );
    }

    #[test]
    fn test_expand_row_index_behind_cursor() {
        let row = RawRow::new(vec![
            RawCell::text("a"),
            RawCell::text("b"),
            RawCell::text("c").at(1),
            RawCell::text("z").at(0),
        ]);
        assert_eq!(
            expand_row(&row),
            vec![text("a"), text("b"), text("c"), text("z")]
        );
    }

    #[test]
    fn test_expand_row_cell_without_data() {
        let row = RawRow::new(vec![RawCell { index: Some(2), data: None }]);
        assert_eq!(expand_row(&row), vec![text(""), text("")]);
    }

    #[test]
    fn test_normalize_drops_blank_rows_and_pads() {
        let rows = vec![
            RawRow::new(vec![RawCell::text("Name"), RawCell::text("Age")]),
            RawRow::new(vec![RawCell::text("x").at(1)]),
            // Blank but wide: must not affect the width.
            RawRow::new(vec![RawCell::text("").at(9)]),
            RawRow::new(vec![RawCell::typed(DataType::Number, "0")]),
            RawRow::default(),
        ];

        let table = normalize_table(&rows);
        assert_eq!(table.width, 2);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec![text("x"), text("")]);
    }
}
