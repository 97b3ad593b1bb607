use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use dialoguer::{Input, Select};
use eventdesk_core::event::Building;
use eventdesk_core::form::{FormField, FormState};
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;
use owo_colors::OwoColorize;

use super::FieldArgs;
use crate::controllers::ScheduleController;

pub async fn run(repo: Arc<EventRepository>, identity: Identity, args: FieldArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let interactive = args.name.is_none()
        || args.date.is_none()
        || args.start.is_none()
        || args.building.is_none()
        || args.room.is_none();
    let mut controller = ScheduleController::new(repo, identity);

    // --- Event name ---
    let name = match args.name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("  Event name")
            .interact_text()?,
    };
    set_or_bail(&mut controller, FormField::EventName, &name)?;

    // --- Date ---
    let min = FormState::min_date(today);
    let date = match args.date {
        Some(date) => date,
        None => prompt_date(min)?,
    };
    set_or_bail(&mut controller, FormField::Date, &date)?;

    // --- Start time ---
    let start = match args.start {
        Some(start) => start,
        None => prompt_time()?,
    };
    set_or_bail(&mut controller, FormField::Start, &start)?;

    // --- Building ---
    let building = match args.building {
        Some(building) => building,
        None => prompt_building(None)?,
    };
    set_or_bail(&mut controller, FormField::BuildingName, &building)?;

    // --- Room number ---
    match args.room {
        Some(room) => set_or_bail(&mut controller, FormField::RoomNumber, &room)?,
        None => loop {
            let input: String = Input::new().with_prompt("  Room number").interact_text()?;
            if controller.set_field(FormField::RoomNumber, &input) && !input.is_empty() {
                break;
            }
            eprintln!("  {}", "Room number must be digits only".red());
        },
    }

    // --- Details ---
    let details = match args.details {
        Some(details) => details,
        None if interactive => Input::new()
            .with_prompt("  Details (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };
    controller.set_field(FormField::Details, &details);

    match controller.submit(today).await {
        Ok((event_id, route)) => {
            if interactive {
                println!();
            }
            println!(
                "{}",
                format!("  Scheduled: {}", controller.form().event_name).green()
            );
            println!("  {}", format!("id: {event_id}").dimmed());
            println!("  {}", format!("→ {}", route.label()).dimmed());
            Ok(())
        }
        Err(e) => {
            eprintln!("  {}", e.to_string().red());
            Err(e.into())
        }
    }
}

fn set_or_bail(controller: &mut ScheduleController, field: FormField, value: &str) -> Result<()> {
    if !controller.set_field(field, value) {
        anyhow::bail!("Rejected value for {:?}: \"{}\"", field, value);
    }
    Ok(())
}

/// Prompt for a date, retrying until it parses and respects the lead time.
pub(super) fn prompt_date(min: NaiveDate) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Date (YYYY-MM-DD, {min} or later)"))
            .interact_text()?;
        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) if date >= min => return Ok(input),
            Ok(_) => eprintln!("  {}", format!("Earliest selectable date is {min}").red()),
            Err(_) => eprintln!("  {}", format!("Could not parse date: \"{input}\"").red()),
        }
    }
}

/// Prompt for a start time, retrying until it parses.
pub(super) fn prompt_time() -> Result<String> {
    loop {
        let input: String = Input::new().with_prompt("  Start time (HH:MM)").interact_text()?;
        match NaiveTime::parse_from_str(&input, "%H:%M") {
            Ok(_) => return Ok(input),
            Err(_) => eprintln!("  {}", format!("Could not parse time: \"{input}\"").red()),
        }
    }
}

/// Pick a building from the closed set.
pub(super) fn prompt_building(current: Option<&str>) -> Result<String> {
    let labels: Vec<&str> = Building::ALL.iter().map(|b| b.label()).collect();
    let default = current
        .and_then(|name| labels.iter().position(|label| *label == name))
        .unwrap_or(0);
    let chosen = Select::new()
        .with_prompt("  Building")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(labels[chosen].to_string())
}
