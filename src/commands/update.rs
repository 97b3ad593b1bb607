use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use dialoguer::Input;
use eventdesk_core::form::{FormField, FormState};
use eventdesk_core::identity::Identity;
use eventdesk_core::repository::EventRepository;
use owo_colors::OwoColorize;

use super::FieldArgs;
use crate::controllers::UpdateController;

pub async fn run(
    repo: Arc<EventRepository>,
    identity: Identity,
    event_id: Option<String>,
    args: FieldArgs,
) -> Result<()> {
    let today = Local::now().date_naive();
    let mut controller = UpdateController::new(event_id, repo, identity);

    if controller.is_missing() {
        println!("{}", "No event found".bold());
        println!("Pass the id of the event to edit: eventdesk update <EVENT_ID>");
        return Ok(());
    }

    match controller.load().await {
        Ok(true) => {}
        Ok(false) => println!("{}", "Event does not exist; starting from a blank form".dimmed()),
        Err(e) => {
            // keep the form interactive; the edit can still be typed and retried
            eprintln!("  {}", e.to_string().red());
        }
    }

    let interactive = args.is_empty();
    if interactive {
        prompt_all(&mut controller)?;
    } else {
        apply_flags(&mut controller, &args)?;
    }

    match controller.submit(today).await {
        Ok(route) => {
            println!(
                "{}",
                format!("  Updated: {}", controller.form().event_name).green()
            );
            println!("  {}", "Approval status was reset to pending".dimmed());
            println!("  {}", format!("→ {}", route.label()).dimmed());
            Ok(())
        }
        Err(e) => {
            eprintln!("  {}", e.to_string().red());
            Err(e.into())
        }
    }
}

fn apply_flags(controller: &mut UpdateController, args: &FieldArgs) -> Result<()> {
    let edits = [
        (FormField::EventName, &args.name),
        (FormField::Date, &args.date),
        (FormField::Start, &args.start),
        (FormField::BuildingName, &args.building),
        (FormField::RoomNumber, &args.room),
        (FormField::Details, &args.details),
    ];
    for (field, value) in edits {
        if let Some(value) = value
            && !controller.set_field(field, value)
        {
            anyhow::bail!("Rejected value for {:?}: \"{}\"", field, value);
        }
    }
    Ok(())
}

/// Walk every field, pre-filled with the loaded values.
fn prompt_all(controller: &mut UpdateController) -> Result<()> {
    let current = controller.form().clone();
    let min = FormState::min_date(Local::now().date_naive());

    let name: String = Input::new()
        .with_prompt("  Event name")
        .default(current.event_name.clone())
        .interact_text()?;
    controller.set_field(FormField::EventName, &name);

    let date = if current.date.is_empty() {
        super::schedule::prompt_date(min)?
    } else {
        Input::new()
            .with_prompt(format!("  Date (YYYY-MM-DD, {min} or later)"))
            .default(current.date.clone())
            .interact_text()?
    };
    controller.set_field(FormField::Date, &date);

    let start: String = Input::new()
        .with_prompt("  Start time (HH:MM)")
        .default(current.start.clone())
        .interact_text()?;
    controller.set_field(FormField::Start, &start);

    let building = super::schedule::prompt_building(Some(&current.building_name))?;
    controller.set_field(FormField::BuildingName, &building);

    loop {
        let room: String = Input::new()
            .with_prompt("  Room number")
            .default(current.room_number.clone())
            .interact_text()?;
        if controller.set_field(FormField::RoomNumber, &room) && !room.is_empty() {
            break;
        }
        eprintln!("  {}", "Room number must be digits only".red());
    }

    let details: String = Input::new()
        .with_prompt("  Details (skip)")
        .default(current.details.clone())
        .show_default(false)
        .interact_text()?;
    controller.set_field(FormField::Details, &details);

    Ok(())
}
