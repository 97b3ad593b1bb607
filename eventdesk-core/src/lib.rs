//! Core types for the eventdesk ecosystem.
//!
//! This crate provides the pieces shared by the CLI and any future front end:
//! - `Event` and related types for scheduled events
//! - `form` module for form state and field validation
//! - `store` module for the document-store client abstraction
//! - `repository` module for the event read/write operations

pub mod error;
pub mod event;
pub mod form;
pub mod identity;
pub mod repository;
pub mod store;

// Re-export the event types at crate root for convenience
pub use error::{EventDeskError, EventDeskResult};
pub use event::*;
