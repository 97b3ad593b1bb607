//! Schedule-form controller.

use std::sync::Arc;

use chrono::NaiveDate;
use eventdesk_core::error::{EventDeskError, EventDeskResult};
use eventdesk_core::form::{FormField, FormState};
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;

use super::Route;

/// Drives the "schedule an event" form: merge field edits, then submit the
/// validated fields through the repository.
pub struct ScheduleController {
    form: FormState,
    repo: Arc<EventRepository>,
    identity: Identity,
}

impl ScheduleController {
    pub fn new(repo: Arc<EventRepository>, identity: Identity) -> Self {
        ScheduleController {
            form: FormState::default(),
            repo,
            identity,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Merge one field edit. A rejected value (non-digit room number)
    /// leaves the form untouched and returns false.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        let accepted = self.form.apply(field, value);
        if !accepted {
            tracing::debug!(?field, value, "rejected field input");
        }
        accepted
    }

    /// Validate and persist the form.
    ///
    /// `today` anchors the lead-time check. On success returns the new
    /// event id and the route to navigate to; on failure the form keeps its
    /// values so the user can retry.
    pub async fn submit(&mut self, today: NaiveDate) -> EventDeskResult<(String, Route)> {
        let Some(user) = self.identity.current() else {
            tracing::warn!("schedule submitted with no signed-in user");
            return Err(EventDeskError::NotAuthenticated);
        };

        let fields = self.form.validate(today)?;
        match self.repo.create_event(&fields, Some(&user)).await {
            Ok(event_id) => {
                tracing::info!(%event_id, "event scheduled");
                Ok((event_id, Route::Home))
            }
            Err(e) => {
                tracing::error!(error = %e, "scheduling failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing::FailingStore;
    use eventdesk_core::identity::{IdentityHandle, UserProfile};
    use eventdesk_core::store::MemoryStore;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn setup() -> (IdentityHandle, Arc<EventRepository>, ScheduleController) {
        let repo = Arc::new(EventRepository::new(Arc::new(MemoryStore::new())));
        let (handle, identity) = Identity::channel();
        let controller = ScheduleController::new(repo.clone(), identity);
        (handle, repo, controller)
    }

    fn fill(controller: &mut ScheduleController) {
        let min = FormState::min_date(today()).format("%Y-%m-%d").to_string();
        assert!(controller.set_field(FormField::EventName, "Movie Night"));
        assert!(controller.set_field(FormField::Date, &min));
        assert!(controller.set_field(FormField::Start, "19:30"));
        assert!(controller.set_field(FormField::BuildingName, "Library"));
        assert!(controller.set_field(FormField::RoomNumber, "12"));
    }

    #[tokio::test]
    async fn unauthenticated_submit_is_a_typed_no_op() {
        let (_handle, _repo, mut controller) = setup();
        fill(&mut controller);

        assert!(matches!(
            controller.submit(today()).await,
            Err(EventDeskError::NotAuthenticated)
        ));
        // form survives for a retry after signing in
        assert_eq!(controller.form().event_name, "Movie Night");
    }

    #[tokio::test]
    async fn submit_creates_the_event_and_navigates_home() {
        let (handle, repo, mut controller) = setup();
        handle.sign_in(repo.ensure_profile("u1").await.unwrap());
        fill(&mut controller);

        let (event_id, route) = controller.submit(today()).await.unwrap();
        assert_eq!(route, Route::Home);

        let event = repo.get_event(&event_id).await.unwrap();
        assert_eq!(event.event_name, "Movie Night");
        assert_eq!(event.created_by, "u1");
        assert!(!event.is_approved);
    }

    #[tokio::test]
    async fn room_number_keystrokes_are_gated() {
        let (_handle, _repo, mut controller) = setup();
        assert!(controller.set_field(FormField::RoomNumber, "12"));
        assert!(!controller.set_field(FormField::RoomNumber, "12a"));
        assert_eq!(controller.form().room_number, "12");
    }

    #[tokio::test]
    async fn lead_time_boundary_is_enforced_at_submit() {
        let (handle, repo, mut controller) = setup();
        handle.sign_in(repo.ensure_profile("u1").await.unwrap());
        fill(&mut controller);

        let too_soon = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
        controller.set_field(FormField::Date, &too_soon);
        assert!(matches!(
            controller.submit(today()).await,
            Err(EventDeskError::ValidationRejected(_))
        ));

        let earliest = FormState::min_date(today()).format("%Y-%m-%d").to_string();
        controller.set_field(FormField::Date, &earliest);
        assert!(controller.submit(today()).await.is_ok());
    }

    #[tokio::test]
    async fn store_failure_surfaces_and_form_survives() {
        let repo = Arc::new(EventRepository::new(Arc::new(FailingStore)));
        let (handle, identity) = Identity::channel();
        handle.sign_in(UserProfile::new("u1"));
        let mut controller = ScheduleController::new(repo, identity);
        fill(&mut controller);

        assert!(matches!(
            controller.submit(today()).await,
            Err(EventDeskError::StoreUnavailable(_))
        ));
        assert_eq!(controller.form().event_name, "Movie Night");
    }
}
