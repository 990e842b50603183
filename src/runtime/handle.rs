use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, instrument};

use crate::{
    codec::{CodecError, xlsx},
    core::{
        edit::{EditState, WalkInDraft},
        store::{RosterStore, StoreError},
    },
    guest::{AttendanceSummary, RosterSnapshot},
    op::Mutation,
    persist::KvStore,
    report::{AttendanceReport, build_report},
    sync::{AppendEndpoint, SyncError, push_snapshot},
    types::{RawRow, RecordIndex},
};

use super::events::RosterEvent;

/// Errors surfaced through [`RosterHandle`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Store mutation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Imported bytes were not a readable workbook.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Remote sync failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// Decode task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
    /// Roster task has stopped.
    #[error("roster runtime is not running")]
    ChannelClosed,
}

/// Channel sizing for [`spawn_roster`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands before senders wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber before it lags.
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

/// Cloneable front door to the roster task.
///
/// Commands run one at a time to completion; reads see the state left by
/// every command sent before them.
#[derive(Clone)]
pub struct RosterHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RosterEvent>,
}

type MutationResult = Result<Option<Mutation>, RuntimeError>;

enum Command {
    ImportRows {
        rows: Vec<RawRow>,
        resp: oneshot::Sender<MutationResult>,
    },
    CheckIn {
        index: RecordIndex,
        resp: oneshot::Sender<MutationResult>,
    },
    Stage {
        name: String,
        phone: String,
        resp: oneshot::Sender<()>,
    },
    AddOrSaveWalkIn {
        name: String,
        phone: String,
        resp: oneshot::Sender<MutationResult>,
    },
    SaveStaged {
        resp: oneshot::Sender<MutationResult>,
    },
    BeginEdit {
        index: RecordIndex,
        resp: oneshot::Sender<MutationResult>,
    },
    RemoveWalkIn {
        index: RecordIndex,
        resp: oneshot::Sender<MutationResult>,
    },
    SetEventName {
        name: String,
        resp: oneshot::Sender<MutationResult>,
    },
    Snapshot {
        resp: oneshot::Sender<RosterSnapshot>,
    },
    Summary {
        resp: oneshot::Sender<AttendanceSummary>,
    },
    Editor {
        resp: oneshot::Sender<(EditState, WalkInDraft)>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `store` onto a tokio task and returns its handle.
///
/// Must be called from within a tokio runtime.
pub fn spawn_roster<K>(store: RosterStore<K>, config: RuntimeConfig) -> RosterHandle
where
    K: KvStore + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<RosterEvent>(config.event_queue_bound);
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }
        debug!("roster runtime stopped");
    });

    RosterHandle { cmd_tx, events_tx }
}

impl RosterHandle {
    /// Receives one event per applied mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events_tx.subscribe()
    }

    /// Replaces the invited list with the normalized `rows`.
    pub async fn import_rows(&self, rows: Vec<RawRow>) -> MutationResult {
        self.request(|resp| Command::ImportRows { rows, resp }).await?
    }

    /// Decodes an `.xlsx` buffer off the runtime, then imports it.
    ///
    /// A decode failure leaves the invited list untouched.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn import_xlsx(&self, bytes: Vec<u8>) -> MutationResult {
        let rows = tokio::task::spawn_blocking(move || xlsx::read_rows(&bytes))
            .await
            .map_err(|e| RuntimeError::Join(e.to_string()))??;
        self.import_rows(rows).await
    }

    /// Marks the guest at `index` present.
    pub async fn check_in(&self, index: RecordIndex) -> MutationResult {
        self.request(|resp| Command::CheckIn { index, resp }).await?
    }

    /// Sets the walk-in form fields without saving.
    pub async fn stage(&self, name: impl Into<String>, phone: impl Into<String>) -> Result<(), RuntimeError> {
        let (name, phone) = (name.into(), phone.into());
        self.request(|resp| Command::Stage { name, phone, resp }).await
    }

    /// Appends a visitor, or overwrites the one under edit.
    pub async fn add_or_save_walk_in(&self, name: impl Into<String>, phone: impl Into<String>) -> MutationResult {
        let (name, phone) = (name.into(), phone.into());
        self.request(|resp| Command::AddOrSaveWalkIn { name, phone, resp })
            .await?
    }

    /// Saves the staged form fields.
    pub async fn save_staged_walk_in(&self) -> MutationResult {
        self.request(|resp| Command::SaveStaged { resp }).await?
    }

    /// Loads the visitor at `index` into the form.
    pub async fn begin_edit_walk_in(&self, index: RecordIndex) -> MutationResult {
        self.request(|resp| Command::BeginEdit { index, resp }).await?
    }

    /// Deletes the visitor at `index`.
    pub async fn remove_walk_in(&self, index: RecordIndex) -> MutationResult {
        self.request(|resp| Command::RemoveWalkIn { index, resp }).await?
    }

    /// Stores the event name verbatim.
    pub async fn set_event_name(&self, name: impl Into<String>) -> MutationResult {
        let name = name.into();
        self.request(|resp| Command::SetEventName { name, resp }).await?
    }

    /// Copy of the current roster.
    pub async fn snapshot(&self) -> Result<RosterSnapshot, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Current attendance counters.
    pub async fn summary(&self) -> Result<AttendanceSummary, RuntimeError> {
        self.request(|resp| Command::Summary { resp }).await
    }

    /// Current edit state and staged form fields.
    pub async fn editor(&self) -> Result<(EditState, WalkInDraft), RuntimeError> {
        self.request(|resp| Command::Editor { resp }).await
    }

    /// Builds the attendance report from a fresh snapshot.
    pub async fn report(&self) -> Result<AttendanceReport, RuntimeError> {
        Ok(build_report(&self.snapshot().await?))
    }

    /// Pushes a snapshot to `endpoint`.
    ///
    /// The snapshot is taken before any network I/O; the roster keeps
    /// accepting commands while the request is in flight.
    pub async fn sync<E: AppendEndpoint>(&self, endpoint: &E) -> Result<usize, RuntimeError> {
        let snapshot = self.snapshot().await?;
        Ok(push_snapshot(&snapshot, endpoint).await?)
    }

    /// Stops the roster task after earlier commands finish.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<K: KvStore>(
    cmd: Command,
    store: &mut RosterStore<K>,
    events_tx: &broadcast::Sender<RosterEvent>,
) -> bool {
    match cmd {
        Command::ImportRows { rows, resp } => {
            let res = store.import_rows(&rows).map(Some);
            let _ = resp.send(publish(events_tx, res));
        }
        Command::CheckIn { index, resp } => {
            let _ = resp.send(publish(events_tx, store.check_in(index)));
        }
        Command::Stage { name, phone, resp } => {
            store.stage_name(name);
            store.stage_phone(phone);
            let _ = resp.send(());
        }
        Command::AddOrSaveWalkIn { name, phone, resp } => {
            let res = store.add_or_save_walk_in(&name, &phone);
            let _ = resp.send(publish(events_tx, res));
        }
        Command::SaveStaged { resp } => {
            let _ = resp.send(publish(events_tx, store.save_staged_walk_in()));
        }
        Command::BeginEdit { index, resp } => {
            let res = Ok(store.begin_edit_walk_in(index));
            let _ = resp.send(publish(events_tx, res));
        }
        Command::RemoveWalkIn { index, resp } => {
            let _ = resp.send(publish(events_tx, store.remove_walk_in(index)));
        }
        Command::SetEventName { name, resp } => {
            let res = store.set_event_name(name).map(Some);
            let _ = resp.send(publish(events_tx, res));
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(store.snapshot());
        }
        Command::Summary { resp } => {
            let _ = resp.send(store.summary());
        }
        Command::Editor { resp } => {
            let _ = resp.send((store.edit_state(), store.staged().clone()));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn publish(
    events_tx: &broadcast::Sender<RosterEvent>,
    res: Result<Option<Mutation>, StoreError>,
) -> MutationResult {
    if let Ok(Some(mutation)) = &res {
        let _ = events_tx.send(RosterEvent::from(mutation.clone()));
    }
    res.map_err(RuntimeError::from)
}
