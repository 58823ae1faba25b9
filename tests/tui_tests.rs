use carkeep::tui::app::{App, InputField, InputMode, ViewMode};
use carkeep::{Config, Garage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open(dir: &Path) -> Garage {
    Garage::open(&Config::in_dir(dir)).unwrap()
}

fn app_with_tasks(tasks: &[&str]) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let mut garage = open(dir.path());
    garage.add_car("Civic", "2009", None).unwrap();
    for task in tasks {
        garage.add_task("Civic", task, "2024-01-01").unwrap();
    }
    let app = App::new(open(dir.path()));
    (dir, app)
}

fn submit(app: &mut App, input: &str) {
    app.input_buffer = input.to_string();
    app.handle_input();
}

fn history(app: &App) -> Vec<String> {
    app.history.iter().map(|(_, t)| t.task.clone()).collect()
}

fn pending(app: &App) -> Vec<String> {
    app.pending.iter().map(|r| r.task.task.clone()).collect()
}

#[test]
fn test_complete_selected_task_after_outside_change() {
    let (dir, mut app) = app_with_tasks(&["A", "B", "C"]);
    app.toggle_view();
    assert!(app.view_mode == ViewMode::Maintenance);
    app.next();
    assert_eq!(app.pending[1].task.task, "B");

    // Another process completes "A" while "B" is selected.
    open(dir.path()).complete_task("Civic", 0, None).unwrap();

    app.start_complete();
    assert!(app.input_mode == InputMode::Editing);
    submit(&mut app, "new pads");

    assert_eq!(history(&app), vec!["A", "B"]);
    assert_eq!(pending(&app), vec!["C"]);
    assert_eq!(app.history[1].1.note.as_deref(), Some("new pads"));
    assert!(app.input_mode == InputMode::Normal);
    assert_eq!(app.target_id, None);
}

#[test]
fn test_complete_task_already_done_elsewhere() {
    let (dir, mut app) = app_with_tasks(&["A", "B"]);
    app.toggle_view();
    let b = app.pending[1].task.id;
    app.next();
    app.start_complete();

    open(dir.path()).complete_task_by_id(b, None).unwrap();
    submit(&mut app, "");

    assert_eq!(history(&app), vec!["B"]);
    assert_eq!(pending(&app), vec!["A"]);
    assert!(app.message.as_deref().unwrap().contains("no longer pending"));
}

#[test]
fn test_complete_only_from_maintenance_view() {
    let (_dir, mut app) = app_with_tasks(&["A"]);
    app.start_complete();
    assert!(app.input_mode == InputMode::Normal);
    assert_eq!(app.target_id, None);
}

#[test]
fn test_add_car_wizard() {
    let dir = TempDir::new().unwrap();
    let mut app = App::new(open(dir.path()));

    app.start_add();
    assert!(app.input_mode == InputMode::Adding);
    submit(&mut app, "   ");
    assert_eq!(app.add_state.step, 0);
    submit(&mut app, "Civic");
    submit(&mut app, "2009");
    submit(&mut app, "");

    assert!(app.input_mode == InputMode::Normal);
    assert_eq!(app.cars.len(), 1);
    assert_eq!(app.cars[0].0, "Civic");
    assert_eq!(app.cars[0].1.model_year, "2009");
    assert_eq!(app.cars[0].1.image_path, "");
    assert_eq!(open(dir.path()).data().cars.len(), 1);
}

#[test]
fn test_add_car_wizard_with_image() {
    let dir = TempDir::new().unwrap();
    let photo = dir.path().join("Red Civic.jpg");
    fs::write(&photo, b"jpeg").unwrap();
    let mut app = App::new(open(dir.path()));

    app.start_add();
    submit(&mut app, "Civic");
    submit(&mut app, "2009");
    submit(&mut app, photo.to_str().unwrap());

    assert_eq!(app.cars[0].1.image_path, "uploads/Red_Civic.jpg");
    assert!(dir.path().join("uploads/Red_Civic.jpg").exists());
}

#[test]
fn test_add_car_with_unreadable_image_reports_error() {
    let dir = TempDir::new().unwrap();
    let mut app = App::new(open(dir.path()));

    app.start_add();
    submit(&mut app, "Civic");
    submit(&mut app, "2009");
    submit(&mut app, dir.path().join("missing.jpg").to_str().unwrap());

    assert!(app.cars.is_empty());
    assert!(app.message.as_deref().unwrap().contains("missing.jpg"));
    assert!(app.input_mode == InputMode::Normal);
}

#[test]
fn test_add_duplicate_car_reports_message() {
    let (_dir, mut app) = app_with_tasks(&[]);
    app.start_add();
    submit(&mut app, "Civic");
    submit(&mut app, "2015");
    submit(&mut app, "");

    assert_eq!(app.cars.len(), 1);
    assert_eq!(app.cars[0].1.model_year, "2009");
    assert!(app.message.as_deref().unwrap().contains("already exists"));
}

#[test]
fn test_add_task_wizard_prefills_selected_car() {
    let (dir, mut app) = app_with_tasks(&["Oil change"]);
    app.toggle_view();

    app.start_add();
    assert_eq!(app.input_buffer, "Civic");
    app.handle_input();
    submit(&mut app, "Brakes");
    submit(&mut app, "2024-02-01");

    assert_eq!(pending(&app), vec!["Oil change", "Brakes"]);
    let reopened = open(dir.path());
    assert_eq!(reopened.data().pending_for("Civic")[1].due_date, "2024-02-01");
}

#[test]
fn test_add_task_to_unknown_car_reports_message() {
    let (_dir, mut app) = app_with_tasks(&[]);
    app.toggle_view();

    app.start_add();
    submit(&mut app, "Ghost");
    submit(&mut app, "Oil change");
    submit(&mut app, "2024-01-01");

    assert!(app.pending.is_empty());
    assert!(app.message.as_deref().unwrap().contains("Ghost"));
}

#[test]
fn test_edit_model_year() {
    let (dir, mut app) = app_with_tasks(&[]);
    app.start_edit(InputField::ModelYear);
    assert_eq!(app.input_buffer, "2009");
    submit(&mut app, "2011");

    assert_eq!(app.cars[0].1.model_year, "2011");
    assert_eq!(open(dir.path()).data().car("Civic").unwrap().model_year, "2011");
}

#[test]
fn test_edit_image_replaces_path() {
    let (dir, mut app) = app_with_tasks(&[]);
    let photo = dir.path().join("civic.png");
    fs::write(&photo, b"png").unwrap();

    app.start_edit(InputField::Image);
    assert_eq!(app.input_buffer, "");
    submit(&mut app, photo.to_str().unwrap());

    assert_eq!(app.cars[0].1.image_path, "uploads/civic.png");
    assert_eq!(app.cars[0].1.model_year, "2009");
}

#[test]
fn test_edit_image_with_empty_path_does_not_write() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("car_maintenance_data.json");
    let compact = r#"{"cars":{"Civic":{"model_year":"2009","image_path":"uploads/a.jpg"}},"maintenance":{},"history":{}}"#;
    fs::write(&data_file, compact).unwrap();
    let mut app = App::new(open(dir.path()));

    app.start_edit(InputField::Image);
    submit(&mut app, "");

    assert_eq!(fs::read_to_string(&data_file).unwrap(), compact);
    assert_eq!(app.cars[0].1.image_path, "uploads/a.jpg");
}

#[test]
fn test_delete_clamps_selection() {
    let (dir, mut app) = app_with_tasks(&["Oil change"]);
    open(dir.path()).add_car("Golf", "2012", None).unwrap();
    app.reload();
    assert_eq!(app.cars.len(), 2);

    app.next();
    assert_eq!(app.state.selected(), Some(1));
    app.delete_selected();

    assert_eq!(app.cars.len(), 1);
    assert_eq!(app.cars[0].0, "Civic");
    assert_eq!(app.state.selected(), Some(0));
    assert_eq!(app.message.as_deref(), Some("Removed 'Golf'"));

    app.delete_selected();
    assert!(app.cars.is_empty());
    assert!(app.pending.is_empty());
    assert_eq!(app.state.selected(), None);
}

#[test]
fn test_navigation_wraps() {
    let (_dir, mut app) = app_with_tasks(&["A", "B", "C"]);
    app.toggle_view();
    assert_eq!(app.state.selected(), Some(0));
    app.previous();
    assert_eq!(app.state.selected(), Some(2));
    app.next();
    assert_eq!(app.state.selected(), Some(0));

    app.toggle_view();
    assert!(app.view_mode == ViewMode::History);
    assert_eq!(app.state.selected(), None);
    app.next();
    assert_eq!(app.state.selected(), None);
}

#[test]
fn test_cancel_input_changes_nothing() {
    let (dir, mut app) = app_with_tasks(&[]);
    app.start_add();
    app.input_buffer = "Golf".to_string();
    app.cancel_input();

    assert!(app.input_mode == InputMode::Normal);
    assert!(app.input_buffer.is_empty());
    assert_eq!(open(dir.path()).data().cars.len(), 1);
}
