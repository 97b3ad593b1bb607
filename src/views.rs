//! Backing state for the "your assigned events" page.

use std::sync::Arc;

use eventdesk_core::Event;
use eventdesk_core::identity::{Identity, UserProfile};
use eventdesk_core::repository::EventRepository;
use tokio::sync::watch;

/// Holds the worker's event list and re-fetches it as identity changes.
///
/// Staleness policy: a refresh replaces the list only on success. A failed
/// fetch logs and keeps the last good result; a signed-out identity performs
/// no fetch at all, so the previous list also stays visible.
pub struct WorkerEventsView {
    repo: Arc<EventRepository>,
    identity: watch::Receiver<Option<UserProfile>>,
    events: Vec<Event>,
}

impl WorkerEventsView {
    pub fn new(repo: Arc<EventRepository>, identity: &Identity) -> Self {
        WorkerEventsView {
            repo,
            identity: identity.subscribe(),
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Wait for the signed-in user to change. Returns false once the
    /// identity channel has shut down.
    pub async fn identity_changed(&mut self) -> bool {
        self.identity.changed().await.is_ok()
    }

    /// Re-fetch the assigned events for the current user.
    pub async fn refresh(&mut self) {
        let user = self.identity.borrow_and_update().clone();
        let Some(user) = user else {
            return;
        };

        match self.repo.list_events_for_worker(&user.uid).await {
            Ok(events) => self.events = events,
            Err(e) => tracing::error!(error = %e, "failed to fetch assigned events"),
        }
    }
}
