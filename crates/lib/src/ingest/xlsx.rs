//! Excel (`.xlsx`) text extraction.
//!
//! Each sheet is rendered in workbook order as a `[시트: name]` header followed
//! by one ` | `-joined line per row. Rows and columns are counted from `A1`
//! up to the last used cell, and rows are cut off after [`XLSX_ROW_LIMIT`].

use super::{truncate_chars, ExtractError};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::{Read, Seek};

pub const XLSX_CHAR_LIMIT: usize = 8_000;

/// The last zero-based row index rendered per sheet.
pub const XLSX_ROW_LIMIT: usize = 500;

const ROWS_OMITTED: &str = "... (이하 생략)";

pub fn extract_text<R: Read + Seek>(reader: R, max_chars: usize) -> Result<String, ExtractError> {
    let mut workbook: Xlsx<_> = Xlsx::new(reader)?;

    let mut parts = Vec::new();
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    for name in sheet_names {
        let range = workbook.worksheet_range(&name)?;
        parts.push(format!("[시트: {name}]"));
        parts.extend(render_lines(&range, XLSX_ROW_LIMIT));
    }

    Ok(truncate_chars(&parts.join("\n"), max_chars))
}

fn render_lines(range: &Range<Data>, row_limit: usize) -> Vec<String> {
    let Some((last_row, last_column)) = range.end() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (index, row) in (0..=last_row).enumerate() {
        if index > row_limit {
            lines.push(ROWS_OMITTED.to_string());
            break;
        }
        let cells: Vec<String> = (0..=last_column)
            .map(|column| range.get_value((row, column)).map(cell_text).unwrap_or_default())
            .collect();
        let line = cells.join(" | ");
        let line = line.trim();
        if !line.replace('|', "").trim().is_empty() {
            lines.push(line.to_string());
        }
    }
    lines
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => number_text(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return number_text(dt.as_f64());
            }
            match dt.as_datetime() {
                // Time-only cells have no date part.
                Some(value) if dt.as_f64() < 1.0 => value.format("%H:%M:%S").to_string(),
                Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => number_text(dt.as_f64()),
            }
        }
    }
}

/// Whole numbers print without a fractional part.
fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn cells_render_by_type() {
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Float(3.5)), "3.5");
        assert_eq!(cell_text(&Data::Bool(true)), "True");
        assert_eq!(cell_text(&Data::Bool(false)), "False");
        assert_eq!(cell_text(&Data::Error(CellErrorType::Div0)), "#DIV/0!");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn date_cells_render_as_timestamps() {
        let date = ExcelDateTime::new(45296.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(date)), "2024-01-05 00:00:00");

        let time = ExcelDateTime::new(0.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(cell_text(&Data::DateTime(time)), "12:00:00");
    }

    #[test]
    fn rows_and_columns_count_from_a1() {
        // Used cells span B2:D4; row 1 and column A are still rendered.
        let mut range = Range::new((1, 1), (3, 3));
        range.set_value((1, 1), Data::String("이름".into()));
        range.set_value((1, 3), Data::String("나이".into()));
        range.set_value((2, 1), Data::String("Kim & Lee".into()));
        range.set_value((2, 2), Data::Bool(true));
        range.set_value((2, 3), Data::Float(42.0));
        range.set_value((3, 3), Data::Float(3.5));

        assert_eq!(
            render_lines(&range, XLSX_ROW_LIMIT),
            vec![
                "| 이름 |  | 나이",
                "| Kim & Lee | True | 42",
                "|  |  | 3.5"
            ]
        );
    }

    #[test]
    fn rows_beyond_the_limit_are_omitted() {
        let mut range = Range::new((0, 0), (9, 0));
        for row in 0..10 {
            range.set_value((row, 0), Data::String(format!("row{}", row + 1)));
        }

        let lines = render_lines(&range, 3);
        assert_eq!(lines, vec!["row1", "row2", "row3", "row4", ROWS_OMITTED]);
    }

    #[test]
    fn empty_sheets_render_nothing() {
        let range: Range<Data> = Range::empty();
        assert!(render_lines(&range, XLSX_ROW_LIMIT).is_empty());
    }
}
