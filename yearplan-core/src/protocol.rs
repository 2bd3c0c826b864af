//! JSON shapes exchanged between the client and the remote endpoint.
//!
//! - `GET /events` answers with an object of date key → event list. Each
//!   value is either a list or a string holding a JSON-encoded list.
//! - `POST /events` takes a [`PersistRequest`] and answers with a
//!   [`PersistResponse`].
//! - Failures carry an [`ErrorResponse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::date_key::DateKey;
use crate::error::{YearPlanError, YearPlanResult};
use crate::event::Event;
use crate::store::Snapshot;

pub const EVENTS_PATH: &str = "/events";

/// Body of `POST /events`: the complete list for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistRequest {
    pub date: DateKey,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decode one day's value. `None` when it isn't a list of events, either
/// directly or after one JSON parse of a string.
pub fn decode_day(value: Value) -> Option<Vec<Event>> {
    match value {
        Value::String(raw) => serde_json::from_str(&raw).ok(),
        list @ Value::Array(_) => serde_json::from_value(list).ok(),
        _ => None,
    }
}

/// Decode a full `GET /events` body.
///
/// Each day is decoded on its own: a malformed value becomes an empty list
/// and a key that isn't a date is dropped, without affecting other days. Only
/// a body that isn't a JSON object is an error.
pub fn decode_snapshot(body: Value) -> YearPlanResult<Snapshot> {
    let Value::Object(entries) = body else {
        return Err(YearPlanError::Serialization(
            "snapshot must be a JSON object".into(),
        ));
    };

    let mut snapshot = Snapshot::new();
    for (key, value) in entries {
        let date = match DateKey::parse(&key) {
            Ok(date) => date,
            Err(_) => {
                warn!(key = %key, "dropping snapshot entry with invalid date key");
                continue;
            }
        };

        let events = decode_day(value).unwrap_or_else(|| {
            warn!(date = %date, "malformed events in snapshot, treating as empty");
            Vec::new()
        });
        snapshot.insert(date, events);
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventId, EventStatus};
    use serde_json::json;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_decode_day_accepts_list_and_encoded_string() {
        let list = json!([{"id": 1, "text": "x", "status": "done"}]);
        let encoded = Value::String(list.to_string());

        let a = decode_day(list).unwrap();
        let b = decode_day(encoded).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].status, EventStatus::Done);
    }

    #[test]
    fn test_decode_day_rejects_non_lists() {
        assert!(decode_day(json!("not json")).is_none());
        assert!(decode_day(json!("{\"id\":1}")).is_none());
        assert!(decode_day(json!(42)).is_none());
        assert!(decode_day(Value::Null).is_none());
    }

    #[test]
    fn test_malformed_day_does_not_spoil_snapshot() {
        let body = json!({
            "2026-01-01": "[{\"id\":1,\"text\":\"x\",\"status\":\"done\"}]",
            "2026-01-02": "[{broken",
            "2026-01-03": [{"id": "meta-emoji", "text": "⭐", "status": "meta"}],
        });

        let snapshot = decode_snapshot(body).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[&key("2026-01-01")].len(), 1);
        assert!(snapshot[&key("2026-01-02")].is_empty());
        assert_eq!(snapshot[&key("2026-01-03")][0].id, EventId::meta());
    }

    #[test]
    fn test_invalid_date_keys_are_dropped() {
        let snapshot = decode_snapshot(json!({"tomorrow": "[]", "2026-05-01": "[]"})).unwrap();
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec![&key("2026-05-01")]);
    }

    #[test]
    fn test_padded_key_does_not_shadow_canonical_day() {
        let snapshot = decode_snapshot(json!({
            "2026-01-01": [{"id": 1, "text": "kept", "status": "done"}],
            "2026- 1-01": [],
        }))
        .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&key("2026-01-01")][0].text, "kept");
    }

    #[test]
    fn test_non_object_body_is_an_error() {
        assert!(decode_snapshot(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_persist_request_shape() {
        let req = PersistRequest {
            date: key("2026-03-02"),
            events: vec![Event::meta("🏃")],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["date"], "2026-03-02");
        assert_eq!(value["events"][0]["status"], "meta");
    }
}
