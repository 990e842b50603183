//! Event check-in roster with write-through key-value persistence.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::RosterStore`]:
//! ```
//! use checkin::{
//!     core::{edit::EditState, store::RosterStore},
//!     persist::memory::MemoryKv,
//!     types::RawRow,
//! };
//!
//! let mut store = RosterStore::open(MemoryKv::new()).expect("open");
//! store
//!     .import_rows(&[RawRow::new().with("Nome", "Ana").with("TELEFONE", "1199")])
//!     .expect("import");
//! store.check_in(0).expect("check in");
//! assert!(store.invited()[0].present);
//!
//! store.add_or_save_walk_in("Bia", "2288").expect("add");
//! store.begin_edit_walk_in(0);
//! assert_eq!(store.edit_state(), EditState::Editing(0));
//! ```
//!
//! Runtime usage with SQLite persistence:
//! ```no_run
//! use checkin::{
//!     core::store::RosterStore,
//!     persist::sqlite::SqliteKv,
//!     runtime::handle::{spawn_roster, RuntimeConfig},
//!     sync::HttpAppendEndpoint,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let kv = SqliteKv::open("checkin.db").expect("open sqlite");
//! let store = RosterStore::open(kv).expect("rehydrate");
//! let handle = spawn_roster(store, RuntimeConfig::default());
//! handle.set_event_name("Lançamento").await.expect("rename");
//! let bytes = std::fs::read("convidados.xlsx").expect("read");
//! handle.import_xlsx(bytes).await.expect("import");
//! handle
//!     .sync(&HttpAppendEndpoint::new("https://example.invalid/append"))
//!     .await
//!     .expect("sync");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Spreadsheet decoding and report encoding.
pub mod codec;
/// Environment configuration.
pub mod config;
/// Core in-memory roster store and edit state.
pub mod core;
/// Guest, visitor, and event records.
pub mod guest;
/// Raw row normalization.
pub mod import;
/// Mutation records.
pub mod op;
/// Key-value persistence abstraction and implementations.
pub mod persist;
/// Attendance report partitioning.
pub mod report;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Remote sync table and endpoint.
pub mod sync;
/// Shared cell, row, and key types.
pub mod types;
