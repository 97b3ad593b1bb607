//! Form state for the schedule and update flows.
//!
//! The form is an explicit value object: raw strings in, a validated
//! [`EventFields`] out. Both flows share the same merge and validation
//! rules (enumerated building, digit-only room number, two-day lead).

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Building, Event, EventFields};

/// Minimum number of days between today and the earliest selectable date.
pub const MIN_LEAD_DAYS: i64 = 2;

/// The fields a form can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    EventName,
    Date,
    Start,
    Details,
    BuildingName,
    RoomNumber,
}

/// Transient form state. All fields are raw strings, empty by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub event_name: String,
    pub date: String,
    pub start: String,
    pub details: String,
    pub building_name: String,
    pub room_number: String,
}

impl FormState {
    /// Pre-populate the form from an existing event (the update flow).
    pub fn from_event(event: &Event) -> Self {
        FormState {
            event_name: event.event_name.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            start: event.start.format("%H:%M").to_string(),
            details: event.details.clone(),
            building_name: event.building_name.label().to_string(),
            room_number: event.room_number.to_string(),
        }
    }

    /// Merge one field change into the state.
    ///
    /// Returns false without touching the state when the candidate value is
    /// rejected. The only input-time gate is the room number: it must be
    /// empty or all decimal digits.
    pub fn apply(&mut self, field: FormField, value: &str) -> bool {
        if field == FormField::RoomNumber && !is_room_number_candidate(value) {
            return false;
        }

        let slot = match field {
            FormField::EventName => &mut self.event_name,
            FormField::Date => &mut self.date,
            FormField::Start => &mut self.start,
            FormField::Details => &mut self.details,
            FormField::BuildingName => &mut self.building_name,
            FormField::RoomNumber => &mut self.room_number,
        };
        *slot = value.to_string();
        true
    }

    /// The earliest selectable event date, relative to the given day.
    pub fn min_date(today: NaiveDate) -> NaiveDate {
        today + Duration::days(MIN_LEAD_DAYS)
    }

    /// Validate the whole form against the submission rules.
    ///
    /// `today` is passed in rather than read from the clock so the lead-time
    /// boundary is deterministic for callers and tests alike.
    pub fn validate(&self, today: NaiveDate) -> EventDeskResult<EventFields> {
        if self.event_name.trim().is_empty() {
            return Err(rejected("event name is required"));
        }

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| rejected(format!("date must be YYYY-MM-DD, got \"{}\"", self.date)))?;
        let min = Self::min_date(today);
        if date < min {
            return Err(rejected(format!("date must be on or after {min}")));
        }

        let start = NaiveTime::parse_from_str(&self.start, "%H:%M")
            .map_err(|_| rejected(format!("start time must be HH:MM, got \"{}\"", self.start)))?;

        let building_name = Building::from_name(&self.building_name)
            .ok_or_else(|| rejected(format!("unknown building \"{}\"", self.building_name)))?;

        let room_number: u32 = self
            .room_number
            .parse()
            .map_err(|_| rejected(format!("room number must be digits, got \"{}\"", self.room_number)))?;
        if room_number < 1 {
            return Err(rejected("room number must be at least 1"));
        }

        Ok(EventFields {
            event_name: self.event_name.clone(),
            date,
            start,
            building_name,
            room_number,
            details: self.details.clone(),
        })
    }
}

fn rejected(detail: impl Into<String>) -> EventDeskError {
    EventDeskError::ValidationRejected(detail.into())
}

fn is_room_number_candidate(value: &str) -> bool {
    value.is_empty() || value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form(today: NaiveDate) -> FormState {
        FormState {
            event_name: "Club Fair".to_string(),
            date: FormState::min_date(today).format("%Y-%m-%d").to_string(),
            start: "13:00".to_string(),
            details: String::new(),
            building_name: "Student Center".to_string(),
            room_number: "101".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn room_number_rejects_non_digits() {
        let mut form = FormState::default();
        assert!(form.apply(FormField::RoomNumber, "12"));
        assert!(!form.apply(FormField::RoomNumber, "12a"));
        // rejected keystroke leaves the prior value in place
        assert_eq!(form.room_number, "12");
    }

    #[test]
    fn room_number_accepts_empty_and_leading_zeros() {
        let mut form = FormState::default();
        assert!(form.apply(FormField::RoomNumber, "045"));
        assert_eq!(form.room_number, "045");
        assert!(form.apply(FormField::RoomNumber, ""));
        assert_eq!(form.room_number, "");
    }

    #[test]
    fn other_fields_merge_without_gating() {
        let mut form = FormState::default();
        assert!(form.apply(FormField::EventName, "Open House"));
        assert!(form.apply(FormField::Details, "room 12a, ask at desk"));
        assert_eq!(form.event_name, "Open House");
    }

    #[test]
    fn date_boundary_at_minimum_lead() {
        let today = today();
        let mut form = filled_form(today);

        // one day short of the lead time
        form.date = (today + Duration::days(MIN_LEAD_DAYS - 1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(matches!(
            form.validate(today),
            Err(EventDeskError::ValidationRejected(_))
        ));

        // exactly at the lead time
        form.date = FormState::min_date(today).format("%Y-%m-%d").to_string();
        assert!(form.validate(today).is_ok());
    }

    #[test]
    fn validate_returns_typed_fields() {
        let today = today();
        let fields = filled_form(today).validate(today).unwrap();
        assert_eq!(fields.event_name, "Club Fair");
        assert_eq!(fields.building_name, Building::StudentCenter);
        assert_eq!(fields.room_number, 101);
        assert_eq!(fields.start, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    fn validate_rejects_unknown_building() {
        let today = today();
        let mut form = filled_form(today);
        form.building_name = "Gymnasium".to_string();
        assert!(matches!(
            form.validate(today),
            Err(EventDeskError::ValidationRejected(_))
        ));
    }

    #[test]
    fn validate_rejects_room_zero_and_blanks() {
        let today = today();

        let mut form = filled_form(today);
        form.room_number = "0".to_string();
        assert!(form.validate(today).is_err());

        let mut form = filled_form(today);
        form.event_name = "  ".to_string();
        assert!(form.validate(today).is_err());

        let mut form = filled_form(today);
        form.start = "1pm".to_string();
        assert!(form.validate(today).is_err());
    }

    #[test]
    fn from_event_round_trips_through_validate() {
        let today = today();
        let fields = filled_form(today).validate(today).unwrap();
        let event = Event {
            id: "e1".to_string(),
            event_name: fields.event_name.clone(),
            date: fields.date,
            start: fields.start,
            building_name: fields.building_name,
            room_number: fields.room_number,
            details: fields.details.clone(),
            created_by: "u1".to_string(),
            timestamp: chrono::Utc::now(),
            updated_at: None,
            is_approved: false,
            workers: Vec::new(),
        };
        assert_eq!(FormState::from_event(&event).validate(today).unwrap(), fields);
    }
}
