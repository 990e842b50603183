//! Remote sync: flattens the roster into rows and posts them to an append endpoint.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::guest::RosterSnapshot;

/// Header row of every sync table.
pub const SYNC_HEADER: [&str; 5] = ["Evento", "Nome", "Telefone", "Presente", "Convidado por"];
/// Attendance cell for present rows.
pub const PRESENT_YES: &str = "Sim";
/// Attendance cell for absent rows.
pub const PRESENT_NO: &str = "Não";
/// Source cell used for every walk-in row.
pub const WALK_IN_SOURCE: &str = "Visitante";

/// Ordered rows, header first.
pub type SyncTable = Vec<Vec<String>>;

/// Reasons a sync attempt did not complete.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Event name is blank; nothing was sent.
    #[error("event name is required")]
    MissingEventName,
    /// No endpoint URL configured.
    #[error("remote sync endpoint is not configured")]
    NotConfigured,
    /// Request failed or the reply was not JSON.
    #[error("network error: {0}")]
    Transport(String),
    /// Reply carried a truthy `error`; holds its `info`.
    #[error("remote rejected rows: {0}")]
    Remote(String),
}

/// JSON body posted to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRequest {
    /// Rows to append, header first.
    pub values: SyncTable,
}

/// Endpoint reply; only `error` and `info` are inspected.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SyncReply {
    /// Truthy when the endpoint rejected the rows.
    #[serde(default)]
    pub error: Option<Value>,
    /// Error detail; strings are used as-is.
    #[serde(default)]
    pub info: Option<Value>,
}

impl SyncReply {
    /// `Err(Remote)` when `error` is truthy, otherwise `Ok`.
    pub fn into_result(self) -> Result<(), SyncError> {
        if !self.error.as_ref().is_some_and(json_truthy) {
            return Ok(());
        }
        let message = match self.info {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => "unknown error".to_string(),
            Some(other) => other.to_string(),
        };
        Err(SyncError::Remote(message))
    }
}

/// Destination that accepts a batch of rows.
pub trait AppendEndpoint: Send + Sync {
    /// Sends `request` once and returns the decoded reply.
    fn append(&self, request: &SyncRequest) -> impl Future<Output = Result<SyncReply, SyncError>> + Send;
}

/// HTTP implementation of [`AppendEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpAppendEndpoint {
    client: Client,
    url: String,
}

impl HttpAppendEndpoint {
    /// Endpoint posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl AppendEndpoint for HttpAppendEndpoint {
    #[instrument(skip(self, request), fields(url = %self.url, rows = request.values.len()))]
    async fn append(&self, request: &SyncRequest) -> Result<SyncReply, SyncError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        response
            .json::<SyncReply>()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))
    }
}

/// Flattens `snapshot` into the sync table.
///
/// Walk-ins are always present and tagged [`WALK_IN_SOURCE`].
pub fn build_sync_table(snapshot: &RosterSnapshot) -> Result<SyncTable, SyncError> {
    let event = snapshot.event.trimmed().ok_or(SyncError::MissingEventName)?;

    let mut table = Vec::with_capacity(1 + snapshot.invited.len() + snapshot.walk_ins.len());
    table.push(SYNC_HEADER.iter().map(|h| h.to_string()).collect());

    for guest in &snapshot.invited {
        table.push(vec![
            event.to_string(),
            guest.name.clone(),
            guest.phone.clone(),
            if guest.present { PRESENT_YES } else { PRESENT_NO }.to_string(),
            guest.invited_by.clone(),
        ]);
    }

    for visitor in &snapshot.walk_ins {
        table.push(vec![
            event.to_string(),
            visitor.name.clone(),
            visitor.phone.clone(),
            PRESENT_YES.to_string(),
            WALK_IN_SOURCE.to_string(),
        ]);
    }

    Ok(table)
}

/// Builds the table for `snapshot` and makes one delivery attempt.
///
/// Returns the number of rows sent, header included.
pub async fn push_snapshot<E: AppendEndpoint>(snapshot: &RosterSnapshot, endpoint: &E) -> Result<usize, SyncError> {
    let request = SyncRequest {
        values: build_sync_table(snapshot)?,
    };
    let rows = request.values.len();

    match endpoint.append(&request).await.and_then(SyncReply::into_result) {
        Ok(()) => {
            info!(rows, "roster synced");
            Ok(rows)
        }
        Err(err) => {
            warn!(error = %err, "roster sync failed");
            Err(err)
        }
    }
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: Value) -> SyncReply {
        serde_json::from_value(value).expect("reply")
    }

    #[test]
    fn falsy_error_field_is_success() {
        assert!(reply(json!({})).into_result().is_ok());
        assert!(reply(json!({"error": false})).into_result().is_ok());
        assert!(reply(json!({"error": 0, "info": "x"})).into_result().is_ok());
        assert!(reply(json!({"error": null})).into_result().is_ok());
    }

    #[test]
    fn truthy_error_surfaces_info() {
        let err = reply(json!({"error": 1, "info": "quota exceeded"}))
            .into_result()
            .expect_err("remote error");
        assert!(matches!(err, SyncError::Remote(ref m) if m == "quota exceeded"));
    }
}
