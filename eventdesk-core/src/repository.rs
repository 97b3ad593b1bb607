//! Event read/write operations over the document store.
//!
//! A thin façade that turns the three application flows (schedule, update,
//! list-by-worker) into store calls. All failures come back as typed errors;
//! deciding what to log or show is the caller's job.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Event, EventFields};
use crate::identity::UserProfile;
use crate::store::{Document, DocumentStore};

pub const EVENTS_COLLECTION: &str = "events";
pub const USERS_COLLECTION: &str = "users";

pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        EventRepository { store }
    }

    /// Persist a new event and record it on the creator's profile.
    ///
    /// Two separate mutations, not one transaction: if the `eventIds` append
    /// fails after the insert succeeded, the event exists but is not listed
    /// on the profile. The append itself is atomic, so concurrent creates by
    /// the same user cannot lose an id.
    pub async fn create_event(
        &self,
        fields: &EventFields,
        creator: Option<&UserProfile>,
    ) -> EventDeskResult<String> {
        let creator = creator.ok_or(EventDeskError::NotAuthenticated)?;

        let mut doc = to_document(fields)?;
        doc.insert("createdBy".to_string(), json!(creator.uid));
        doc.insert("timestamp".to_string(), timestamp_value(Utc::now())?);
        doc.insert("isApproved".to_string(), json!(false));
        doc.insert("workers".to_string(), json!([]));

        let event_id = self.store.insert(EVENTS_COLLECTION, doc).await?;
        self.store
            .append_to_array(USERS_COLLECTION, &creator.uid, "eventIds", &event_id)
            .await?;
        Ok(event_id)
    }

    /// Point lookup of one event.
    pub async fn get_event(&self, event_id: &str) -> EventDeskResult<Event> {
        let doc = self
            .store
            .get_by_id(EVENTS_COLLECTION, event_id)
            .await?
            .ok_or_else(|| EventDeskError::NotFound(event_id.to_string()))?;
        event_from_document(event_id, doc)
    }

    /// Overwrite the form-editable fields of an existing event.
    ///
    /// Every update drops the event back to unapproved and stamps
    /// `updatedAt`, regardless of prior state.
    pub async fn update_event(&self, event_id: &str, fields: &EventFields) -> EventDeskResult<()> {
        let mut patch = to_document(fields)?;
        patch.insert("isApproved".to_string(), json!(false));
        patch.insert("updatedAt".to_string(), timestamp_value(Utc::now())?);
        self.store.update(EVENTS_COLLECTION, event_id, patch).await
    }

    /// All events whose `workers` array contains the given uid.
    ///
    /// Events the user merely created do not appear here. Order is whatever
    /// the store returns.
    pub async fn list_events_for_worker(&self, uid: &str) -> EventDeskResult<Vec<Event>> {
        let docs = self
            .store
            .query_array_contains(EVENTS_COLLECTION, "workers", uid)
            .await?;
        docs.into_iter()
            .map(|(id, doc)| event_from_document(&id, doc))
            .collect()
    }

    /// Fetch the user's profile, creating an empty one on first contact so
    /// the `eventIds` append in [`create_event`](Self::create_event) has a
    /// document to land on.
    pub async fn ensure_profile(&self, uid: &str) -> EventDeskResult<UserProfile> {
        if let Some(doc) = self.store.get_by_id(USERS_COLLECTION, uid).await? {
            return serde_json::from_value(Value::Object(doc))
                .map_err(|e| EventDeskError::Serialization(e.to_string()));
        }

        let profile = UserProfile::new(uid);
        self.store
            .upsert(USERS_COLLECTION, uid, to_document(&profile)?)
            .await?;
        Ok(profile)
    }
}

fn to_document<T: Serialize>(value: &T) -> EventDeskResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(EventDeskError::Serialization(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(EventDeskError::Serialization(e.to_string())),
    }
}

fn timestamp_value(instant: chrono::DateTime<Utc>) -> EventDeskResult<Value> {
    serde_json::to_value(instant).map_err(|e| EventDeskError::Serialization(e.to_string()))
}

fn event_from_document(id: &str, doc: Document) -> EventDeskResult<Event> {
    let mut event: Event = serde_json::from_value(Value::Object(doc))
        .map_err(|e| EventDeskError::Serialization(e.to_string()))?;
    event.id = id.to_string();
    Ok(event)
}
