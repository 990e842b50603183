//! `.xlsx` decoding into [`RawRow`]s and report encoding.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use rust_xlsxwriter::Workbook;
use tracing::{debug, instrument};

use crate::{
    report::{AttendanceReport, TabularRecord},
    types::{CellValue, RawRow},
};

use super::{CodecError, CodecResult};

/// Header name given to blank header cells.
const EMPTY_HEADER: &str = "__EMPTY";

/// Decodes the first worksheet of `bytes`, using its first row as headers.
///
/// Fully blank data rows are skipped.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn read_rows(bytes: &[u8]) -> CodecResult<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let first = first_sheet(&workbook.sheet_names())?;
    let range = workbook.worksheet_range(&first)?;

    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers = header_names(header_cells);

    let out: Vec<RawRow> = rows
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(col, header)| {
                    let value = cells.get(col).map(cell_value).unwrap_or_default();
                    (header.clone(), value)
                })
                .collect::<RawRow>()
        })
        .filter(|row| !row.is_blank())
        .collect();

    debug!(sheet = %first, rows = out.len(), "decoded worksheet");
    Ok(out)
}

/// Encodes the three report datasets as sheets of one workbook.
pub fn write_report(report: &AttendanceReport) -> CodecResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, AttendanceReport::PRESENT_SHEET, &report.present)?;
    write_sheet(&mut workbook, AttendanceReport::ABSENT_SHEET, &report.absent)?;
    write_sheet(&mut workbook, AttendanceReport::WALK_IN_SHEET, &report.walk_ins)?;
    Ok(workbook.save_to_buffer()?)
}

fn write_sheet<R: TabularRecord>(workbook: &mut Workbook, name: &str, records: &[R]) -> CodecResult<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, header) in R::COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in record.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(row, col, b)?;
                }
            }
        }
    }
    Ok(())
}

fn first_sheet(names: &[String]) -> CodecResult<String> {
    names.first().cloned().ok_or(CodecError::NoSheets)
}

fn header_names(cells: &[Data]) -> Vec<String> {
    let mut blanks = 0usize;
    cells
        .iter()
        .map(|cell| {
            let text = cell.to_string();
            if !text.trim().is_empty() {
                return text;
            }
            let name = if blanks == 0 {
                EMPTY_HEADER.to_string()
            } else {
                format!("{EMPTY_HEADER}_{blanks}")
            };
            blanks += 1;
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_without_sheets_is_rejected() {
        assert!(matches!(first_sheet(&[]), Err(CodecError::NoSheets)));
        let names = vec!["Convidados".to_string(), "Outra".to_string()];
        assert_eq!(first_sheet(&names).unwrap(), "Convidados");
    }

    #[test]
    fn blank_headers_are_numbered() {
        let cells = [
            Data::String("Nome".into()),
            Data::Empty,
            Data::String("  ".into()),
            Data::Empty,
        ];
        assert_eq!(header_names(&cells), ["Nome", "__EMPTY", "__EMPTY_1", "__EMPTY_2"]);
    }
}
