//! Runtime event stream payloads.

use crate::{op::Mutation, types::RecordIndex};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Invited list replaced by an import.
    InvitedReplaced {
        /// Guests now on the roster.
        count: usize,
    },
    /// Guest checked in.
    CheckedIn {
        /// Invited-list position.
        index: RecordIndex,
    },
    /// Walk-in appended.
    WalkInAdded {
        /// Walk-in list position.
        index: RecordIndex,
    },
    /// Walk-in under edit overwritten.
    WalkInSaved {
        /// Walk-in list position.
        index: RecordIndex,
    },
    /// Walk-in deleted.
    WalkInRemoved {
        /// Former walk-in list position.
        index: RecordIndex,
    },
    /// Walk-in loaded for editing.
    EditBegun {
        /// Walk-in list position.
        index: RecordIndex,
    },
    /// Event name changed.
    EventRenamed,
}

impl From<Mutation> for RosterEvent {
    fn from(value: Mutation) -> Self {
        match value {
            Mutation::InvitedReplaced { count } => Self::InvitedReplaced { count },
            Mutation::CheckedIn { index } => Self::CheckedIn { index },
            Mutation::WalkInAdded { index } => Self::WalkInAdded { index },
            Mutation::WalkInSaved { index } => Self::WalkInSaved { index },
            Mutation::WalkInRemoved { index } => Self::WalkInRemoved { index },
            Mutation::EditBegun { index } => Self::EditBegun { index },
            Mutation::EventRenamed => Self::EventRenamed,
        }
    }
}
