//! Final attendance report.

use crate::{
    codec::{CodecResult, xlsx},
    guest::{GuestRecord, RosterSnapshot, VisitorRecord},
    types::CellValue,
};

/// Default download name for the report workbook.
pub const REPORT_FILE_NAME: &str = "relatorio_final.xlsx";

/// Record that can be dumped as one sheet row.
pub trait TabularRecord {
    /// Header row, in field order.
    const COLUMNS: &'static [&'static str];
    /// Cells in [`TabularRecord::COLUMNS`] order.
    fn cells(&self) -> Vec<CellValue>;
}

impl TabularRecord for GuestRecord {
    const COLUMNS: &'static [&'static str] = &GuestRecord::FIELDS;

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.phone.clone()),
            CellValue::Text(self.invited_by.clone()),
            CellValue::Bool(self.present),
        ]
    }
}

impl TabularRecord for VisitorRecord {
    const COLUMNS: &'static [&'static str] = &VisitorRecord::FIELDS;

    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.phone.clone()),
        ]
    }
}

/// Invited guests split by attendance, plus every walk-in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendanceReport {
    /// Invited guests who checked in.
    pub present: Vec<GuestRecord>,
    /// Invited guests who never checked in.
    pub absent: Vec<GuestRecord>,
    /// Walk-in visitors, verbatim.
    pub walk_ins: Vec<VisitorRecord>,
}

impl AttendanceReport {
    /// Sheet holding [`AttendanceReport::present`].
    pub const PRESENT_SHEET: &'static str = "Presentes";
    /// Sheet holding [`AttendanceReport::absent`].
    pub const ABSENT_SHEET: &'static str = "Faltaram";
    /// Sheet holding [`AttendanceReport::walk_ins`].
    pub const WALK_IN_SHEET: &'static str = "NaoListados";

    /// Sheet names in workbook order.
    pub const SHEETS: [&'static str; 3] = [Self::PRESENT_SHEET, Self::ABSENT_SHEET, Self::WALK_IN_SHEET];

    /// Encodes the report as an `.xlsx` workbook.
    pub fn to_xlsx(&self) -> CodecResult<Vec<u8>> {
        xlsx::write_report(self)
    }
}

/// Partitions `snapshot` into report datasets, keeping roster order in each.
pub fn build_report(snapshot: &RosterSnapshot) -> AttendanceReport {
    let (present, absent): (Vec<GuestRecord>, Vec<GuestRecord>) =
        snapshot.invited.iter().cloned().partition(|g| g.present);
    AttendanceReport {
        present,
        absent,
        walk_ins: snapshot.walk_ins.clone(),
    }
}
