//! The running planner: events, heatmap cells, the open day and sync.

use std::collections::BTreeMap;

use yearplan_core::heatmap::{self, Cell};
use yearplan_core::{Control, DateKey, Event, EventId, EventStore, InitialStatus, Outcome, Year};

use crate::sync::{LoadOutcome, SyncClient};

/// Owns all mutable planner state.
///
/// Every write goes through here so that it is followed, in order, by a
/// heatmap refresh of the day and a background save of the day. Writes that
/// change nothing (blank text, no open day, unknown event) skip both.
pub struct Session {
    year: Year,
    store: EventStore,
    cells: BTreeMap<DateKey, Cell>,
    active: Option<DateKey>,
    sync: SyncClient,
}

impl Session {
    pub fn new(year: Year, sync: SyncClient) -> Self {
        let cells = year.days().into_iter().map(|d| (d, Cell::default())).collect();
        Session {
            year,
            store: EventStore::new(),
            cells,
            active: None,
            sync,
        }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn events(&self, date: &DateKey) -> &[Event] {
        self.store.events(date)
    }

    /// Heatmap cells for every day of the year, in order.
    pub fn cells(&self) -> &BTreeMap<DateKey, Cell> {
        &self.cells
    }

    pub fn cell(&self, date: &DateKey) -> Cell {
        self.cells
            .get(date)
            .cloned()
            .unwrap_or_else(|| heatmap::project(self.store.events(date)))
    }

    pub fn is_locked(&self) -> bool {
        self.sync.is_locked()
    }

    pub fn unlock(&mut self, token: &str) -> anyhow::Result<bool> {
        self.sync.unlock(token)
    }

    pub fn lock(&mut self) -> anyhow::Result<()> {
        self.sync.lock()
    }

    /// Replace local events with the server's and redraw every cell.
    pub async fn load(&mut self) -> LoadOutcome {
        let outcome = self.sync.load_snapshot(&mut self.store).await;
        if let LoadOutcome::Loaded { .. } = outcome {
            self.refresh_all();
        }
        outcome
    }

    pub fn active(&self) -> Option<DateKey> {
        self.active
    }

    pub fn open(&mut self, date: DateKey) {
        self.active = Some(date);
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    /// Add an event to the open day.
    pub fn add_event(&mut self, text: &str, status: InitialStatus) -> Option<EventId> {
        let date = self.active?;
        let id = self.store.add_event(date, text, status)?;
        self.commit(date);
        Some(id)
    }

    /// Toggle done/todo, or restore an abandoned event.
    pub fn primary(&mut self, id: &EventId) -> Option<Outcome> {
        self.control(id, Control::Primary)
    }

    /// Give up on an event, or delete it for good if already given up.
    pub fn delete(&mut self, id: &EventId) -> Option<Outcome> {
        self.control(id, Control::Delete)
    }

    /// Set or clear (with a blank glyph) the open day's glyph.
    pub fn set_glyph(&mut self, glyph: &str) -> bool {
        let Some(date) = self.active else {
            return false;
        };
        self.store.set_meta(date, glyph);
        self.commit(date);
        true
    }

    /// Wait for background saves to finish.
    pub async fn drain(&self) {
        self.sync.drain().await;
    }

    fn control(&mut self, id: &EventId, control: Control) -> Option<Outcome> {
        let date = self.active?;
        let outcome = self.store.apply(&date, id, control)?;
        self.commit(date);
        Some(outcome)
    }

    fn commit(&mut self, date: DateKey) {
        self.refresh(date);
        self.sync.persist_date(date, self.store.events(&date).to_vec());
    }

    fn refresh(&mut self, date: DateKey) {
        if self.year.contains(&date) {
            self.cells
                .insert(date, heatmap::project(self.store.events(&date)));
        }
    }

    fn refresh_all(&mut self) {
        for date in self.year.days() {
            self.refresh(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RemoteClient;
    use crate::token::TokenStore;
    use serde_json::{Value, json};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use yearplan_core::EventStatus;

    struct Harness {
        server: MockServer,
        session: Session,
        _dir: tempfile::TempDir,
    }

    async fn harness(snapshot: Value) -> Harness {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(snapshot))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let remote = RemoteClient::new(&server.uri()).unwrap();
        let mut sync = SyncClient::new(remote, TokenStore::in_dir(dir.path()));
        sync.unlock("hunter2").unwrap();

        Harness {
            server,
            session: Session::new(Year::default(), sync),
            _dir: dir,
        }
    }

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    async fn posted(server: &MockServer) -> Vec<Value> {
        server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_load_refreshes_every_cell() {
        let mut h = harness(json!({
            "2026-01-01": "[{\"id\":1,\"text\":\"x\",\"status\":\"done\"}]",
            "2026-01-02": [{"id": "meta-emoji", "text": "⭐", "status": "meta"}],
        }))
        .await;

        assert_eq!(h.session.load().await, LoadOutcome::Loaded { days: 2 });
        assert_eq!(h.session.cell(&key("2026-01-01")).level.value(), 1);
        assert_eq!(h.session.cell(&key("2026-01-02")).glyph, "⭐");
        assert_eq!(h.session.cells().len(), 365);
    }

    #[tokio::test]
    async fn test_writes_need_an_open_day() {
        let mut h = harness(json!({})).await;

        assert!(h.session.add_event("run", InitialStatus::Done).is_none());
        assert!(!h.session.set_glyph("🏃"));
        h.session.drain().await;
        assert!(posted(&h.server).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_refreshes_cell_then_saves_day() {
        let mut h = harness(json!({})).await;
        let day = key("2026-03-02");
        h.session.open(day);

        for _ in 0..4 {
            h.session.add_event("run", InitialStatus::Done).unwrap();
        }
        assert_eq!(h.session.cell(&day).level.value(), 3);

        h.session.drain().await;
        let bodies = posted(&h.server).await;
        assert_eq!(bodies.len(), 4);
        assert!(bodies.iter().all(|b| b["date"] == "2026-03-02"));
        let sizes: Vec<usize> = bodies
            .iter()
            .map(|b| b["events"].as_array().unwrap().len())
            .collect();
        let mut sorted = sizes.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_blank_text_is_a_silent_no_op() {
        let mut h = harness(json!({})).await;
        h.session.open(key("2026-03-02"));

        assert!(h.session.add_event("   ", InitialStatus::Todo).is_none());
        h.session.drain().await;
        assert!(posted(&h.server).await.is_empty());
    }

    #[tokio::test]
    async fn test_overloaded_controls() {
        let mut h = harness(json!({})).await;
        let day = key("2026-04-10");
        h.session.open(day);
        let id = h.session.add_event("swim", InitialStatus::Todo).unwrap();

        assert_eq!(h.session.primary(&id), Some(Outcome::SetStatus(EventStatus::Done)));
        assert_eq!(h.session.cell(&day).level.value(), 1);

        assert_eq!(h.session.delete(&id), Some(Outcome::SetStatus(EventStatus::Giveup)));
        assert_eq!(h.session.cell(&day).level.value(), 0);
        assert_eq!(h.session.events(&day).len(), 1);

        assert_eq!(h.session.primary(&id), Some(Outcome::SetStatus(EventStatus::Todo)));
        h.session.delete(&id);
        assert_eq!(h.session.delete(&id), Some(Outcome::Destroy));
        assert!(h.session.events(&day).is_empty());

        assert_eq!(h.session.delete(&id), None);
        h.session.drain().await;
        // add + five effective controls, nothing for the no-op
        assert_eq!(posted(&h.server).await.len(), 6);
    }

    #[tokio::test]
    async fn test_glyph_set_then_cleared() {
        let mut h = harness(json!({})).await;
        let day = key("2026-03-02");
        h.session.open(day);
        h.session.add_event("run", InitialStatus::Done);

        h.session.set_glyph("🏃");
        assert_eq!(h.session.cell(&day).glyph, "🏃");

        h.session.set_glyph("");
        let cell = h.session.cell(&day);
        assert_eq!(cell.glyph, "");
        assert_eq!(cell.level.value(), 1);
        assert_eq!(h.session.events(&day).len(), 1);

        h.session.drain().await;
        let bodies = posted(&h.server).await;
        assert_eq!(bodies.len(), 3);
    }

    #[tokio::test]
    async fn test_day_outside_year_still_editable() {
        let mut h = harness(json!({})).await;
        let day = key("2027-01-01");
        h.session.open(day);
        h.session.add_event("later", InitialStatus::Done);

        assert_eq!(h.session.cells().len(), 365);
        assert_eq!(h.session.cell(&day).level.value(), 1);
        h.session.drain().await;
    }
}
