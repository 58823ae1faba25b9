use std::path::Path;

use chrono::Local;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::due::{due_status, DueStatus};
use crate::error::Result;
use crate::garage::Garage;
use crate::models::MaintenanceTask;
use crate::storage::ImageUpload;

fn read_image(image: Option<&Path>) -> Result<Option<ImageUpload>> {
    image.map(ImageUpload::from_path).transpose()
}

/// Registers a new car, copying the image into the uploads directory if given.
pub fn cmd_car_add(
    garage: &mut Garage,
    name: &str,
    model_year: &str,
    image: Option<&Path>,
    silent: bool,
) -> Result<()> {
    let upload = read_image(image)?;
    if garage.add_car(name, model_year, upload.as_ref())? {
        if !silent { println!("Car '{}' added.", name); }
    } else if !silent {
        println!("Car '{}' already exists. Nothing changed.", name);
    }
    Ok(())
}

/// Sets a car's model year, and its image when one is given.
pub fn cmd_car_edit(
    garage: &mut Garage,
    name: &str,
    model_year: &str,
    image: Option<&Path>,
    silent: bool,
) -> Result<()> {
    let upload = read_image(image)?;
    if garage.edit_car(name, model_year, upload.as_ref())? {
        if !silent { println!("Car '{}' updated.", name); }
    } else if !silent {
        println!("Car '{}' not found.", name);
    }
    Ok(())
}

/// Removes a car along with its maintenance and history.
pub fn cmd_car_remove(garage: &mut Garage, name: &str, silent: bool) -> Result<()> {
    if garage.remove_car(name)? {
        if !silent { println!("Car '{}' removed.", name); }
    } else if !silent {
        println!("Car '{}' not found.", name);
    }
    Ok(())
}

/// Lists all cars with their pending and completed task counts.
pub fn cmd_car_list(garage: &Garage) {
    let data = garage.data();
    if data.cars.is_empty() {
        println!("No cars in the garage.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Year").add_attribute(Attribute::Bold),
            Cell::new("Image").add_attribute(Attribute::Bold),
            Cell::new("Pending").add_attribute(Attribute::Bold),
            Cell::new("Done").add_attribute(Attribute::Bold),
        ]);
    for (name, car) in &data.cars {
        let pending = data.pending_for(name).len();
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&car.model_year),
            Cell::new(if car.image_path.is_empty() { "-" } else { car.image_path.as_str() }),
            Cell::new(pending).fg(if pending > 0 { Color::Yellow } else { Color::Reset }),
            Cell::new(data.history_for(name).len()),
        ]);
    }
    println!("{table}");
}

/// Schedules a maintenance task for a car.
pub fn cmd_task_add(
    garage: &mut Garage,
    car_name: &str,
    task: &str,
    due_date: &str,
    silent: bool,
) -> Result<()> {
    match garage.add_task(car_name, task, due_date)? {
        Some(id) => { if !silent { println!("Task added (id = {})", id); } }
        None => { if !silent { println!("Car '{}' not found. Task discarded.", car_name); } }
    }
    Ok(())
}

/// Completes the task at `index` in the car's pending list.
pub fn cmd_task_complete(
    garage: &mut Garage,
    car_name: &str,
    index: usize,
    note: Option<&str>,
    silent: bool,
) -> Result<()> {
    match garage.complete_task(car_name, index, note)? {
        Some(t) => { if !silent { print_completed(car_name, &t); } }
        None => {
            if !silent { println!("No pending task #{} for '{}'. Nothing changed.", index, car_name); }
        }
    }
    Ok(())
}

/// Completes a pending task by its id.
pub fn cmd_task_done(garage: &mut Garage, id: u64, note: Option<&str>, silent: bool) -> Result<()> {
    match garage.complete_task_by_id(id, note)? {
        Some((car, t)) => { if !silent { print_completed(&car, &t); } }
        None => { if !silent { println!("No pending task with id {}.", id); } }
    }
    Ok(())
}

fn print_completed(car_name: &str, task: &MaintenanceTask) {
    println!(
        "'{}' on {} completed {}.",
        task.task,
        car_name,
        task.completion_date.as_deref().unwrap_or_default()
    );
}

/// Lists pending tasks per car in list order. `#` is the position used by `task complete`.
pub fn cmd_task_list(garage: &Garage, car_filter: Option<&str>) {
    let data = garage.data();
    let today = Local::now().date_naive();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Car").add_attribute(Attribute::Bold),
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Time Left").add_attribute(Attribute::Bold),
        ]);

    let mut rows = 0;
    for (car, tasks) in &data.maintenance {
        if car_filter.is_some_and(|f| f != car.as_str()) {
            continue;
        }
        for (index, t) in tasks.iter().enumerate() {
            let status = due_status(t, today);
            let color = match status {
                DueStatus::Overdue(_) => Color::Red,
                DueStatus::Today => Color::Yellow,
                DueStatus::Upcoming(_) => Color::Green,
                DueStatus::Done | DueStatus::Unscheduled => Color::Reset,
            };
            let mut cells = vec![
                Cell::new(car),
                Cell::new(index),
                Cell::new(t.id),
                Cell::new(&t.task),
                Cell::new(&t.due_date),
                Cell::new(status.label()).fg(color),
            ];
            if status.is_pressing() {
                cells = cells.into_iter().map(|c| c.add_attribute(Attribute::Bold)).collect();
            }
            table.add_row(cells);
            rows += 1;
        }
    }

    if rows == 0 {
        println!("No pending maintenance.");
        return;
    }
    println!("{table}");
}

/// Lists completed tasks per car, including notes.
pub fn cmd_history(garage: &Garage, car_filter: Option<&str>) {
    let data = garage.data();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Car").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Completed").add_attribute(Attribute::Bold),
            Cell::new("Note").add_attribute(Attribute::Bold),
        ]);

    let mut rows = 0;
    for (car, tasks) in &data.history {
        if car_filter.is_some_and(|f| f != car.as_str()) {
            continue;
        }
        for t in tasks {
            table.add_row(vec![
                Cell::new(car),
                Cell::new(t.id),
                Cell::new(&t.task),
                Cell::new(&t.due_date),
                Cell::new(t.completion_date.as_deref().unwrap_or_default()).fg(Color::Green),
                Cell::new(t.note.as_deref().unwrap_or_default()),
            ]);
            rows += 1;
        }
    }

    if rows == 0 {
        println!("No maintenance history.");
        return;
    }
    println!("{table}");
}
