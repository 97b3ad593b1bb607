//! Store-neutral event types.
//!
//! These types mirror the documents kept in the `events` collection.
//! Field names on the wire are camelCase to match the collection schema,
//! so documents written here stay readable by the other front ends.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled event, as stored in the `events` collection.
///
/// The `id` is the document key assigned by the store on insert; it is never
/// written into the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub event_name: String,
    /// Calendar date of the event (`YYYY-MM-DD` on the wire)
    pub date: NaiveDate,
    /// Start time of day (`HH:MM` on the wire)
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub building_name: Building,
    pub room_number: u32,
    #[serde(default)]
    pub details: String,
    /// Uid of the user that scheduled the event. Set once, never mutated.
    pub created_by: String,
    /// Creation instant. Set once, never mutated.
    pub timestamp: DateTime<Utc>,
    /// Last modification instant. Set on every update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// False on create, forced back to false on every update.
    /// Approval itself happens in a separate admin workflow.
    #[serde(default)]
    pub is_approved: bool,
    /// Uids of the users assigned to work this event. Populated by the
    /// external assignment workflow, only queried here.
    #[serde(default)]
    pub workers: Vec<String>,
}

impl Event {
    /// Extract the user-editable fields (the ones a form round-trips).
    pub fn fields(&self) -> EventFields {
        EventFields {
            event_name: self.event_name.clone(),
            date: self.date,
            start: self.start,
            building_name: self.building_name,
            room_number: self.room_number,
            details: self.details.clone(),
        }
    }
}

/// The validated, user-editable subset of an event.
///
/// Produced by form validation; consumed by the repository's create and
/// update operations. Serializes to the same wire names as [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    pub event_name: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub building_name: Building,
    pub room_number: u32,
    #[serde(default)]
    pub details: String,
}

/// The closed set of buildings an event can be scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    #[serde(rename = "Science Hall")]
    ScienceHall,
    #[serde(rename = "Library")]
    Library,
    #[serde(rename = "Student Center")]
    StudentCenter,
    #[serde(rename = "Engineering Annex")]
    EngineeringAnnex,
    #[serde(rename = "Fine Arts Center")]
    FineArtsCenter,
}

impl Building {
    pub const ALL: [Building; 5] = [
        Building::ScienceHall,
        Building::Library,
        Building::StudentCenter,
        Building::EngineeringAnnex,
        Building::FineArtsCenter,
    ];

    /// Display name, identical to the wire representation.
    pub fn label(&self) -> &'static str {
        match self {
            Building::ScienceHall => "Science Hall",
            Building::Library => "Library",
            Building::StudentCenter => "Student Center",
            Building::EngineeringAnnex => "Engineering Annex",
            Building::FineArtsCenter => "Fine Arts Center",
        }
    }

    /// Look a building up by its display name.
    pub fn from_name(name: &str) -> Option<Building> {
        Building::ALL.into_iter().find(|b| b.label() == name)
    }
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serde helper for `HH:MM` times-of-day.
///
/// Accepts `HH:MM:SS` on input too, since older documents carry seconds.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
