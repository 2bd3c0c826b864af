//! Year events endpoint

use axum::{Json, Router, body::Bytes, extract::State, routing::get};
use serde_json::{Map, Value};
use tracing::warn;

use yearplan_core::DateKey;
use yearplan_core::protocol::{EVENTS_PATH, PersistResponse};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        EVENTS_PATH,
        get(list_events)
            .post(save_events)
            .fallback(method_not_allowed),
    )
}

/// GET /events - Every stored day, decoded
async fn list_events(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, AppError> {
    let fields = state.store.get_all().await;

    let days = fields
        .into_iter()
        .map(|(date, raw)| {
            let events = decode_stored(&date, &raw);
            (date, events)
        })
        .collect();

    Ok(Json(days))
}

/// A stored value that doesn't decode to a list is served as `[]`.
fn decode_stored(date: &str, raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(list @ Value::Array(_)) => list,
        _ => {
            warn!(date, "stored events are not a list, serving empty list");
            Value::Array(Vec::new())
        }
    }
}

/// POST /events - Replace one day's events
async fn save_events(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PersistResponse>, AppError> {
    let invalid = || AppError::bad_request("Invalid data format");

    let body: Value = serde_json::from_slice(&body).map_err(|_| invalid())?;

    let date = body
        .get("date")
        .and_then(Value::as_str)
        .and_then(|d| DateKey::parse(d).ok())
        .ok_or_else(invalid)?;

    let events = body
        .get("events")
        .filter(|e| e.is_array())
        .ok_or_else(invalid)?;

    state
        .store
        .set(&date.to_string(), serde_json::to_string(events)?)
        .await?;

    Ok(Json(PersistResponse { success: true }))
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::storage::HashStore;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::json;
    use tower::ServiceExt;

    fn app(secret: Option<&str>) -> (Router, AppState) {
        let state = AppState::new(
            HashStore::in_memory("year_2026_events"),
            secret.map(String::from),
        );
        (routes::router(state.clone()), state)
    }

    fn request(method: Method, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(EVENTS_PATH);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_post_then_get_roundtrip() {
        let (app, _) = app(Some("pw"));
        let events = json!([
            {"id": 2, "text": "b", "status": "todo"},
            {"id": 1, "text": "a", "status": "done"},
        ]);

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                Some("pw"),
                Some(json!({"date": "2026-03-02", "events": events})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, body) = send(&app, request(Method::GET, Some("pw"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"2026-03-02": events}));
    }

    #[tokio::test]
    async fn test_missing_or_wrong_token_is_unauthorized() {
        let (app, _) = app(Some("pw"));

        let (status, body) = send(&app, request(Method::GET, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Unauthorized"}));

        let (status, _) = send(&app, request(Method::GET, Some("nope"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            request(Method::POST, Some("nope"), Some(json!({"date": "2026-01-01", "events": []}))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_no_secret_accepts_anonymous_requests() {
        let (app, _) = app(None);

        let (status, body) = send(&app, request(Method::GET, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_bad_requests() {
        let (app, state) = app(None);
        let bad = [
            json!({"events": []}),
            json!({"date": "", "events": []}),
            json!({"date": "2026-13-01", "events": []}),
            json!({"date": "2026- 1-01", "events": []}),
            json!({"date": "2026-01-01"}),
            json!({"date": "2026-01-01", "events": "[]"}),
            json!({"date": "2026-01-01", "events": {"id": 1}}),
        ];

        for body in bad {
            let (status, reply) = send(&app, request(Method::POST, None, Some(body.clone()))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(reply, json!({"error": "Invalid data format"}));
        }

        let req = Request::builder()
            .method(Method::POST)
            .uri(EVENTS_PATH)
            .body(Body::from("not json"))
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(state.store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed_after_auth() {
        let (app, _) = app(Some("pw"));

        let (status, body) = send(&app, request(Method::PUT, Some("pw"), None)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));

        let (status, _) = send(&app, request(Method::DELETE, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_corrupt_stored_day_served_as_empty_list() {
        let (app, state) = app(None);
        state.store.set("2026-01-01", "{oops".to_string()).await.unwrap();
        state
            .store
            .set("2026-01-02", "[{\"id\":1,\"text\":\"x\",\"status\":\"done\"}]".to_string())
            .await
            .unwrap();

        let (status, body) = send(&app, request(Method::GET, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["2026-01-01"], json!([]));
        assert_eq!(body["2026-01-02"][0]["status"], "done");
    }

    #[tokio::test]
    async fn test_post_replaces_whole_day() {
        let (app, state) = app(None);
        for events in [json!([{"id": 1, "text": "a", "status": "todo"}]), json!([])] {
            let (status, _) = send(
                &app,
                request(Method::POST, None, Some(json!({"date": "2026-06-01", "events": events}))),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(state.store.get_all().await["2026-06-01"], "[]");
    }
}
