use std::sync::{Arc, Mutex};

use checkin::{
    guest::{EventContext, GuestRecord, RosterSnapshot, VisitorRecord},
    sync::{
        AppendEndpoint, SYNC_HEADER, SyncError, SyncReply, SyncRequest, WALK_IN_SOURCE,
        build_sync_table, push_snapshot,
    },
};

#[derive(Default)]
struct RecordingEndpoint {
    requests: Arc<Mutex<Vec<SyncRequest>>>,
    reply: SyncReply,
}

impl AppendEndpoint for RecordingEndpoint {
    async fn append(&self, request: &SyncRequest) -> Result<SyncReply, SyncError> {
        self.requests.lock().expect("lock").push(request.clone());
        Ok(self.reply.clone())
    }
}

struct FailingEndpoint;

impl AppendEndpoint for FailingEndpoint {
    async fn append(&self, _request: &SyncRequest) -> Result<SyncReply, SyncError> {
        Err(SyncError::Transport("connection refused".to_string()))
    }
}

fn snapshot(event_name: &str) -> RosterSnapshot {
    RosterSnapshot {
        event: EventContext {
            event_name: event_name.to_string(),
        },
        invited: vec![
            GuestRecord {
                present: true,
                ..GuestRecord::new("Ana", "1", "Rita")
            },
            GuestRecord::new("Bia", "2", ""),
        ],
        walk_ins: vec![
            VisitorRecord {
                name: "Caio".to_string(),
                phone: "3".to_string(),
            },
            VisitorRecord {
                name: "Duda".to_string(),
                phone: "4".to_string(),
            },
        ],
    }
}

#[test]
fn table_has_header_then_guests_then_walk_ins() {
    let snap = snapshot("  Festa  ");
    let table = build_sync_table(&snap).expect("table");

    assert_eq!(table.len(), 1 + snap.invited.len() + snap.walk_ins.len());
    assert_eq!(table[0], SYNC_HEADER);
    assert_eq!(table[1], ["Festa", "Ana", "1", "Sim", "Rita"]);
    assert_eq!(table[2], ["Festa", "Bia", "2", "Não", ""]);
    assert_eq!(table[3], ["Festa", "Caio", "3", "Sim", "Visitante"]);
}

#[test]
fn walk_ins_are_always_present_visitors() {
    let table = build_sync_table(&snapshot("Festa")).expect("table");
    for row in &table[3..] {
        assert_eq!(row[3], "Sim");
        assert_eq!(row[4], WALK_IN_SOURCE);
    }
}

#[test]
fn blank_event_name_is_rejected() {
    assert!(matches!(
        build_sync_table(&snapshot("   ")),
        Err(SyncError::MissingEventName)
    ));
}

#[tokio::test]
async fn blank_event_name_sends_nothing() {
    let endpoint = RecordingEndpoint::default();
    let err = push_snapshot(&snapshot(" "), &endpoint).await.expect_err("fail fast");
    assert!(matches!(err, SyncError::MissingEventName));
    assert!(endpoint.requests.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn successful_push_sends_one_request() {
    let endpoint = RecordingEndpoint::default();
    let rows = push_snapshot(&snapshot("Festa"), &endpoint).await.expect("push");
    assert_eq!(rows, 5);

    let requests = endpoint.requests.lock().expect("lock");
    assert_eq!(requests.len(), 1);
    let body = serde_json::to_value(&requests[0]).expect("json");
    assert_eq!(body["values"][0][0], "Evento");
    assert_eq!(body["values"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn remote_error_carries_info_message() {
    let endpoint = RecordingEndpoint {
        reply: serde_json::from_str(r#"{"error": true, "info": "sheet not found"}"#).expect("reply"),
        ..RecordingEndpoint::default()
    };
    let err = push_snapshot(&snapshot("Festa"), &endpoint).await.expect_err("remote error");
    assert!(matches!(err, SyncError::Remote(ref m) if m == "sheet not found"));
    assert_eq!(endpoint.requests.lock().expect("lock").len(), 1, "no retry");
}

#[tokio::test]
async fn transport_failure_is_surfaced() {
    let err = push_snapshot(&snapshot("Festa"), &FailingEndpoint).await.expect_err("transport");
    assert!(matches!(err, SyncError::Transport(_)));
}
