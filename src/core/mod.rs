//! In-memory authoritative roster and walk-in edit state.

/// Walk-in edit state machine and staged form fields.
pub mod edit;
/// Authoritative roster store.
pub mod store;
