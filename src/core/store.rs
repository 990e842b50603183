use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    guest::{AttendanceSummary, EventContext, GuestRecord, RosterSnapshot, VisitorRecord},
    import::normalize_rows,
    op::Mutation,
    persist::{KvStore, PersistError},
    types::{EVENT_NAME_KEY, INVITED_LIST_KEY, RawRow, RecordIndex, WALK_IN_LIST_KEY},
};

use super::edit::{EditState, WalkInDraft};

/// Failure applying a roster mutation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write-through or rehydrate failed; memory is unchanged.
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}

/// Result alias for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Invited list, walk-in list, and event name, written through to `K`.
///
/// Every mutation writes the affected key before touching memory, so a
/// failed write leaves both copies as they were.
pub struct RosterStore<K = Box<dyn KvStore>> {
    kv: K,
    invited: Vec<GuestRecord>,
    walk_ins: Vec<VisitorRecord>,
    event: EventContext,
    edit: EditState,
    staged: WalkInDraft,
}

impl<K: KvStore> RosterStore<K> {
    /// Rehydrates state from `kv`; absent keys start empty.
    pub fn open(kv: K) -> StoreResult<Self> {
        let invited = load_json(&kv, INVITED_LIST_KEY)?;
        let walk_ins = load_json(&kv, WALK_IN_LIST_KEY)?;
        let event_name = kv.get(EVENT_NAME_KEY)?.unwrap_or_default();
        debug!(
            invited = invited.len(),
            walk_ins = walk_ins.len(),
            "roster rehydrated"
        );
        Ok(Self {
            kv,
            invited,
            walk_ins,
            event: EventContext { event_name },
            edit: EditState::Idle,
            staged: WalkInDraft::default(),
        })
    }

    /// Invited guests in import order.
    pub fn invited(&self) -> &[GuestRecord] {
        &self.invited
    }

    /// Walk-in visitors in entry order.
    pub fn walk_ins(&self) -> &[VisitorRecord] {
        &self.walk_ins
    }

    /// Event name exactly as stored, untrimmed.
    pub fn event_name(&self) -> &str {
        &self.event.event_name
    }

    /// Whether the walk-in form is editing a row.
    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// Staged walk-in form fields.
    pub fn staged(&self) -> &WalkInDraft {
        &self.staged
    }

    /// Backing store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Owned copy of the persisted roster state.
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            event: self.event.clone(),
            invited: self.invited.clone(),
            walk_ins: self.walk_ins.clone(),
        }
    }

    /// Confirmed, present, and walk-in counters.
    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary {
            confirmed: self.invited.len(),
            present: self.invited.iter().filter(|g| g.present).count(),
            walk_ins: self.walk_ins.len(),
        }
    }

    /// Discards the invited list and installs `guests` in its place.
    pub fn replace_invited(&mut self, guests: Vec<GuestRecord>) -> StoreResult<Mutation> {
        self.write_json(INVITED_LIST_KEY, &guests)?;
        let count = guests.len();
        self.invited = guests;
        debug!(count, "invited list replaced");
        Ok(Mutation::InvitedReplaced { count })
    }

    /// Normalizes decoded rows and replaces the invited list with the result.
    pub fn import_rows(&mut self, rows: &[RawRow]) -> StoreResult<Mutation> {
        self.replace_invited(normalize_rows(rows))
    }

    /// Marks the guest at `index` present. Out of range or already present is a no-op.
    pub fn check_in(&mut self, index: RecordIndex) -> StoreResult<Option<Mutation>> {
        match self.invited.get(index) {
            Some(guest) if !guest.present => {}
            _ => return Ok(None),
        }

        let mut next = self.invited.clone();
        next[index].present = true;
        self.write_json(INVITED_LIST_KEY, &next)?;
        self.invited = next;
        debug!(index, "guest checked in");
        Ok(Some(Mutation::CheckedIn { index }))
    }

    /// Sets the staged name field.
    pub fn stage_name(&mut self, name: impl Into<String>) {
        self.staged.name = name.into();
    }

    /// Sets the staged phone field.
    pub fn stage_phone(&mut self, phone: impl Into<String>) {
        self.staged.phone = phone.into();
    }

    /// Runs [`RosterStore::add_or_save_walk_in`] with the staged fields.
    pub fn save_staged_walk_in(&mut self) -> StoreResult<Option<Mutation>> {
        let WalkInDraft { name, phone } = self.staged.clone();
        self.add_or_save_walk_in(&name, &phone)
    }

    /// Appends a visitor, or overwrites the one under edit.
    ///
    /// Blank name or phone is a silent no-op. On success the edit ends and
    /// the staged fields are cleared.
    pub fn add_or_save_walk_in(&mut self, name: &str, phone: &str) -> StoreResult<Option<Mutation>> {
        let Some(visitor) = VisitorRecord::validated(name, phone) else {
            return Ok(None);
        };

        let mut next = self.walk_ins.clone();
        let mutation = match self.edit.target() {
            Some(index) if index < next.len() => {
                next[index] = visitor;
                Mutation::WalkInSaved { index }
            }
            _ => {
                next.push(visitor);
                Mutation::WalkInAdded {
                    index: next.len() - 1,
                }
            }
        };

        self.write_json(WALK_IN_LIST_KEY, &next)?;
        self.walk_ins = next;
        self.edit = EditState::Idle;
        self.staged.clear();
        debug!(?mutation, "walk-in stored");
        Ok(Some(mutation))
    }

    /// Loads the visitor at `index` into the staged fields for editing.
    pub fn begin_edit_walk_in(&mut self, index: RecordIndex) -> Option<Mutation> {
        let visitor = self.walk_ins.get(index)?;
        self.staged = WalkInDraft {
            name: visitor.name.clone(),
            phone: visitor.phone.clone(),
        };
        self.edit = EditState::Editing(index);
        Some(Mutation::EditBegun { index })
    }

    /// Deletes the visitor at `index`, keeping any edit pointed at the same visitor.
    pub fn remove_walk_in(&mut self, index: RecordIndex) -> StoreResult<Option<Mutation>> {
        if index >= self.walk_ins.len() {
            return Ok(None);
        }

        let mut next = self.walk_ins.clone();
        next.remove(index);
        self.write_json(WALK_IN_LIST_KEY, &next)?;
        self.walk_ins = next;

        let edit = self.edit.after_removal(index);
        if self.edit.target() == Some(index) {
            self.staged.clear();
        }
        self.edit = edit;
        debug!(index, edit = ?self.edit, "walk-in removed");
        Ok(Some(Mutation::WalkInRemoved { index }))
    }

    /// Stores the event name verbatim.
    pub fn set_event_name(&mut self, name: impl Into<String>) -> StoreResult<Mutation> {
        let name = name.into();
        self.kv.set(EVENT_NAME_KEY, &name)?;
        self.event.event_name = name;
        Ok(Mutation::EventRenamed)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(PersistError::from)?;
        self.kv.set(key, &json)?;
        Ok(())
    }
}

fn load_json<K: KvStore, T: DeserializeOwned>(kv: &K, key: &str) -> StoreResult<Vec<T>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw)
        .map_err(PersistError::from)
        .map_err(StoreError::from)
}
