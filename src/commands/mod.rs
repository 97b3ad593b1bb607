pub mod events;
pub mod schedule;
pub mod show;
pub mod update;

use clap::Args;

/// Form-field flags shared by the schedule and update commands. Anything
/// left out is prompted for interactively.
#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Event name
    #[arg(long)]
    pub name: Option<String>,

    /// Event date (YYYY-MM-DD, at least two days ahead)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// Building name
    #[arg(long)]
    pub building: Option<String>,

    /// Room number (digits only)
    #[arg(long)]
    pub room: Option<String>,

    /// Free-form details
    #[arg(long)]
    pub details: Option<String>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.start.is_none()
            && self.building.is_none()
            && self.room.is_none()
            && self.details.is_none()
    }
}
