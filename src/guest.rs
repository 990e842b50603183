//! Guest, visitor, and event records.

use serde::{Deserialize, Serialize};

/// Invited guest imported from the roster spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Trimmed, non-empty guest name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Trimmed, non-empty phone number.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Who invited the guest; empty when unknown.
    #[serde(rename = "convidadoPor", default)]
    pub invited_by: String,
    /// Set once the guest checks in; never cleared.
    #[serde(rename = "presente", default)]
    pub present: bool,
}

impl GuestRecord {
    /// Column headers used when the record is dumped to a sheet.
    pub const FIELDS: [&'static str; 4] = ["nome", "telefone", "convidadoPor", "presente"];

    /// Builds a not-yet-present guest.
    pub fn new(name: impl Into<String>, phone: impl Into<String>, invited_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            invited_by: invited_by.into(),
            present: false,
        }
    }
}

/// Walk-in visitor added at the door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    /// Trimmed, non-empty visitor name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Trimmed, non-empty phone number.
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl VisitorRecord {
    /// Column headers used when the record is dumped to a sheet.
    pub const FIELDS: [&'static str; 2] = ["nome", "telefone"];

    /// Trims both fields; `None` if either ends up empty.
    pub fn validated(name: &str, phone: &str) -> Option<Self> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() || phone.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }
}

/// Event label used by the report and the remote sync.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventContext {
    /// Name as typed; trimmed only when consumed.
    pub event_name: String,
}

impl EventContext {
    /// Trimmed name, `None` when blank.
    pub fn trimmed(&self) -> Option<&str> {
        let name = self.event_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Immutable copy of the roster taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterSnapshot {
    /// Event label at capture time.
    pub event: EventContext,
    /// Invited list in roster order.
    pub invited: Vec<GuestRecord>,
    /// Walk-in list in entry order.
    pub walk_ins: Vec<VisitorRecord>,
}

/// Headline counters for the check-in desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceSummary {
    /// Invited guests on the roster.
    pub confirmed: usize,
    /// Invited guests already checked in.
    pub present: usize,
    /// Walk-in visitors.
    pub walk_ins: usize,
}
