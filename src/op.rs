//! Mutation records returned by the roster store.

use crate::types::RecordIndex;

/// One applied change to the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Invited list replaced by an import.
    InvitedReplaced {
        /// Guests in the new list.
        count: usize,
    },
    /// Guest marked present.
    CheckedIn {
        /// Position in the invited list.
        index: RecordIndex,
    },
    /// Walk-in appended.
    WalkInAdded {
        /// Position of the new visitor.
        index: RecordIndex,
    },
    /// Walk-in under edit overwritten.
    WalkInSaved {
        /// Position of the overwritten visitor.
        index: RecordIndex,
    },
    /// Walk-in deleted.
    WalkInRemoved {
        /// Former position of the visitor.
        index: RecordIndex,
    },
    /// Walk-in loaded into the staging fields.
    EditBegun {
        /// Position of the visitor being edited.
        index: RecordIndex,
    },
    /// Event name changed.
    EventRenamed,
}
