//! Normalization of raw spreadsheet rows into invited guests.

use tracing::info;

use crate::{
    guest::GuestRecord,
    types::{CellValue, RawRow},
};

/// Case-folded header for the guest name column.
pub const NAME_COLUMN: &str = "nome";
/// Case-folded header for the phone column.
pub const PHONE_COLUMN: &str = "telefone";
/// Case-folded header for the optional invited-by column.
pub const INVITED_BY_COLUMN: &str = "convidadopor";

/// Converts one row, or `None` when name or phone is missing or blank.
pub fn normalize_row(row: &RawRow) -> Option<GuestRecord> {
    let name = required_text(row.find_folded(NAME_COLUMN)?)?;
    let phone = required_text(row.find_folded(PHONE_COLUMN)?)?;
    let invited_by = row
        .find_folded(INVITED_BY_COLUMN)
        .map(CellValue::to_trimmed_text)
        .unwrap_or_default();

    Some(GuestRecord::new(name, phone, invited_by))
}

/// Converts every admissible row, silently dropping the rest.
///
/// Output order follows input order and every guest starts absent,
/// whatever a `presente` column says.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<GuestRecord> {
    let guests: Vec<GuestRecord> = rows.iter().filter_map(normalize_row).collect();
    info!(
        admitted = guests.len(),
        dropped = rows.len() - guests.len(),
        "normalized imported rows"
    );
    guests
}

fn required_text(cell: &CellValue) -> Option<String> {
    if !cell.is_truthy() {
        return None;
    }
    let text = cell.to_trimmed_text();
    (!text.is_empty()).then_some(text)
}
