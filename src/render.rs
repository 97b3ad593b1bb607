//! Terminal rendering for events.

use eventdesk_core::Event;
use owo_colors::OwoColorize;

/// Print the worker's assigned events, one block per event, in store order.
pub fn render_worker_events(events: &[Event]) {
    println!("{}", "Your assigned events".bold());

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return;
    }

    for event in events {
        println!();
        println!(
            "{}  {}",
            event.date.format("%a %b %-d"),
            event.event_name.bold()
        );
        println!(
            "  {} in {} room {}",
            event.start.format("%H:%M"),
            event.building_name,
            event.room_number
        );
        if !event.details.is_empty() {
            println!("  {}", event.details.dimmed());
        }
    }
}

/// Print one event in full.
pub fn render_event(event: &Event) {
    let status = if event.is_approved {
        "approved"
    } else {
        "pending approval"
    };

    println!("{}", event.event_name.bold());
    println!(
        "  {} {} at {}",
        "when:".dimmed(),
        event.date.format("%Y-%m-%d"),
        event.start.format("%H:%M")
    );
    println!(
        "  {} {} room {}",
        "where:".dimmed(),
        event.building_name,
        event.room_number
    );
    if !event.details.is_empty() {
        println!("  {} {}", "details:".dimmed(), event.details);
    }
    println!("  {} {}", "status:".dimmed(), status);
    println!("  {} {}", "id:".dimmed(), event.id);
}
