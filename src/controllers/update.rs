//! Update-form controller.

use std::sync::Arc;

use chrono::NaiveDate;
use eventdesk_core::error::{EventDeskError, EventDeskResult};
use eventdesk_core::form::{FormField, FormState};
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;

use super::Route;

/// Drives the "update an event" form.
///
/// Constructed without an event id it is a terminal not-found state: nothing
/// to load, nothing to submit. Otherwise `load` pre-fills the form from the
/// stored event, and `submit` writes the edited fields back (dropping the
/// event to unapproved).
pub struct UpdateController {
    event_id: Option<String>,
    form: FormState,
    repo: Arc<EventRepository>,
    identity: Identity,
}

impl UpdateController {
    pub fn new(event_id: Option<String>, repo: Arc<EventRepository>, identity: Identity) -> Self {
        UpdateController {
            event_id,
            form: FormState::default(),
            repo,
            identity,
        }
    }

    /// True when no event id was supplied at all.
    pub fn is_missing(&self) -> bool {
        self.event_id.is_none()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Fetch the event and pre-fill the form.
    ///
    /// Returns false, leaving the empty defaults in place, when the event
    /// does not exist. Store failures propagate; the form stays usable
    /// either way.
    pub async fn load(&mut self) -> EventDeskResult<bool> {
        let Some(event_id) = self.event_id.clone() else {
            return Ok(false);
        };

        match self.repo.get_event(&event_id).await {
            Ok(event) => {
                self.form = FormState::from_event(&event);
                Ok(true)
            }
            Err(EventDeskError::NotFound(_)) => {
                tracing::error!(%event_id, "event does not exist");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch event");
                Err(e)
            }
        }
    }

    /// Merge one field edit, with the same gating as the schedule form.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        let accepted = self.form.apply(field, value);
        if !accepted {
            tracing::debug!(?field, value, "rejected field input");
        }
        accepted
    }

    /// Validate and write the edited fields back to the store.
    pub async fn submit(&mut self, today: NaiveDate) -> EventDeskResult<Route> {
        let Some(event_id) = self.event_id.clone() else {
            return Err(EventDeskError::NotFound("no event id".to_string()));
        };
        if self.identity.current().is_none() {
            tracing::warn!("update submitted with no signed-in user");
            return Err(EventDeskError::NotAuthenticated);
        }

        let fields = self.form.validate(today)?;
        match self.repo.update_event(&event_id, &fields).await {
            Ok(()) => {
                tracing::info!(%event_id, "event updated");
                Ok(Route::Calendar)
            }
            Err(e) => {
                tracing::error!(error = %e, "update failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::FailingStore;
    use eventdesk_core::event::{Building, EventFields};
    use eventdesk_core::identity::{IdentityHandle, UserProfile};
    use eventdesk_core::store::MemoryStore;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn sample_fields() -> EventFields {
        EventFields {
            event_name: "Career Fair".to_string(),
            date: FormState::min_date(today()),
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            building_name: Building::StudentCenter,
            room_number: 5,
            details: String::new(),
        }
    }

    async fn seeded() -> (IdentityHandle, Identity, Arc<EventRepository>, String) {
        let repo = Arc::new(EventRepository::new(Arc::new(MemoryStore::new())));
        let (handle, identity) = Identity::channel();
        let user = repo.ensure_profile("u1").await.unwrap();
        let event_id = repo.create_event(&sample_fields(), Some(&user)).await.unwrap();
        (handle, identity, repo, event_id)
    }

    #[tokio::test]
    async fn without_an_event_id_the_controller_is_terminal() {
        let repo = Arc::new(EventRepository::new(Arc::new(MemoryStore::new())));
        let (_handle, identity) = Identity::channel();
        let mut controller = UpdateController::new(None, repo, identity);

        assert!(controller.is_missing());
        assert!(!controller.load().await.unwrap());
        assert!(controller.submit(today()).await.is_err());
    }

    #[tokio::test]
    async fn load_pre_fills_the_form() {
        let (_handle, identity, repo, event_id) = seeded().await;
        let mut controller = UpdateController::new(Some(event_id), repo, identity);

        assert!(controller.load().await.unwrap());
        assert_eq!(controller.form().event_name, "Career Fair");
        assert_eq!(controller.form().building_name, "Student Center");
        assert_eq!(controller.form().room_number, "5");
    }

    #[tokio::test]
    async fn load_of_a_missing_event_keeps_the_defaults() {
        let (_handle, identity, repo, _) = seeded().await;
        let mut controller = UpdateController::new(Some("ghost".to_string()), repo, identity);

        assert!(!controller.load().await.unwrap());
        assert_eq!(controller.form(), &FormState::default());
    }

    #[tokio::test]
    async fn submit_writes_back_and_resets_approval() {
        let (handle, identity, repo, event_id) = seeded().await;
        handle.sign_in(repo.ensure_profile("u1").await.unwrap());
        let mut controller = UpdateController::new(Some(event_id.clone()), repo.clone(), identity);

        controller.load().await.unwrap();
        controller.set_field(FormField::EventName, "Career Fair (rescheduled)");
        controller.set_field(FormField::RoomNumber, "6");
        let route = controller.submit(today()).await.unwrap();
        assert_eq!(route, Route::Calendar);

        let event = repo.get_event(&event_id).await.unwrap();
        assert_eq!(event.event_name, "Career Fair (rescheduled)");
        assert_eq!(event.room_number, 6);
        assert!(!event.is_approved);
        assert!(event.updated_at.is_some());
    }

    #[tokio::test]
    async fn unauthenticated_submit_is_rejected() {
        let (_handle, identity, repo, event_id) = seeded().await;
        let mut controller = UpdateController::new(Some(event_id), repo, identity);
        controller.load().await.unwrap();

        assert!(matches!(
            controller.submit(today()).await,
            Err(EventDeskError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn store_failure_keeps_the_form_populated() {
        let repo = Arc::new(EventRepository::new(Arc::new(FailingStore)));
        let (handle, identity) = Identity::channel();
        handle.sign_in(UserProfile::new("u1"));
        let mut controller = UpdateController::new(Some("e1".to_string()), repo, identity);

        // load fails against the offline store; form stays at defaults
        assert!(controller.load().await.is_err());

        controller.set_field(FormField::EventName, "Career Fair");
        controller.set_field(FormField::Date, &FormState::min_date(today()).format("%Y-%m-%d").to_string());
        controller.set_field(FormField::Start, "10:00");
        controller.set_field(FormField::BuildingName, "Student Center");
        controller.set_field(FormField::RoomNumber, "5");

        assert!(matches!(
            controller.submit(today()).await,
            Err(EventDeskError::StoreUnavailable(_))
        ));
        assert_eq!(controller.form().event_name, "Career Fair");
    }
}
