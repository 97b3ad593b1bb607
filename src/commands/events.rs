use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;
use owo_colors::OwoColorize;

use crate::render;
use crate::views::WorkerEventsView;

pub async fn run(repo: Arc<EventRepository>, identity: Identity) -> Result<()> {
    if identity.current().is_none() {
        println!(
            "{}",
            "Not signed in. Set `user` in your config file to see assigned events.".dimmed()
        );
        return Ok(());
    }

    let mut view = WorkerEventsView::new(repo, &identity);
    view.refresh().await;
    render::render_worker_events(view.events());
    Ok(())
}
