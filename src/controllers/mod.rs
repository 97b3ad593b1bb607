//! Form controllers for the schedule and update flows.
//!
//! Controllers own the transient form state and orchestrate a submit against
//! the repository. Store failures are logged here and handed back typed, so
//! the command layer can keep the form alive for a retry.

pub mod schedule;
pub mod update;

pub use schedule::ScheduleController;
pub use update::UpdateController;

/// Where the UI goes after a successful submit. Navigation is
/// fire-and-forget: the controller only names the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Calendar,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Calendar => "calendar",
        }
    }
}
