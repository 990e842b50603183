use crate::types::RecordIndex;

/// Whether the walk-in form is adding a new visitor or overwriting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// Saving appends a new visitor.
    #[default]
    Idle,
    /// Saving overwrites the visitor at this position.
    Editing(RecordIndex),
}

impl EditState {
    /// Position under edit, if any.
    pub fn target(self) -> Option<RecordIndex> {
        match self {
            Self::Idle => None,
            Self::Editing(i) => Some(i),
        }
    }

    /// State after the walk-in at `removed` is deleted.
    ///
    /// Removing the target itself aborts the edit; removing an earlier
    /// row shifts the target down so it keeps naming the same visitor.
    pub fn after_removal(self, removed: RecordIndex) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Editing(i) if i == removed => Self::Idle,
            Self::Editing(i) if removed < i => Self::Editing(i - 1),
            Self::Editing(i) => Self::Editing(i),
        }
    }
}

/// Staged walk-in form inputs. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalkInDraft {
    /// Name field as typed.
    pub name: String,
    /// Phone field as typed.
    pub phone: String,
}

impl WalkInDraft {
    /// Empties both fields.
    pub fn clear(&mut self) {
        self.name.clear();
        self.phone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_shifts_only_when_earlier() {
        assert_eq!(EditState::Editing(2).after_removal(0), EditState::Editing(1));
        assert_eq!(EditState::Editing(2).after_removal(2), EditState::Idle);
        assert_eq!(EditState::Editing(2).after_removal(3), EditState::Editing(2));
        assert_eq!(EditState::Idle.after_removal(0), EditState::Idle);
    }
}
