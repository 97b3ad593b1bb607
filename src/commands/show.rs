use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::error::EventDeskError;
use eventdesk_core::repository::EventRepository;
use owo_colors::OwoColorize;

use crate::render;

pub async fn run(repo: Arc<EventRepository>, event_id: &str) -> Result<()> {
    match repo.get_event(event_id).await {
        Ok(event) => {
            render::render_event(&event);
            Ok(())
        }
        Err(EventDeskError::NotFound(_)) => {
            println!("{}", "Event not found".dimmed());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
