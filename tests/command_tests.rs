use carkeep::commands::*;
use carkeep::{Config, Garage};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn with_test_garage<F>(f: F)
where
    F: FnOnce(&mut Garage, PathBuf),
{
    let dir = TempDir::new().unwrap();
    let mut garage = Garage::open(&Config::in_dir(dir.path())).unwrap();
    f(&mut garage, dir.path().to_path_buf());
}

#[test]
fn test_car_add_with_image_file() {
    with_test_garage(|garage, dir| {
        let photo = dir.join("Family Car.JPG");
        fs::write(&photo, b"raw image").unwrap();

        cmd_car_add(garage, "Civic", "2009", Some(photo.as_path()), true).unwrap();

        assert_eq!(garage.data().car("Civic").unwrap().image_path, "uploads/Family_Car.JPG");
        assert!(dir.join("uploads").join("Family_Car.JPG").exists());
    });
}

#[test]
fn test_car_add_with_missing_image_fails() {
    with_test_garage(|garage, dir| {
        let result = cmd_car_add(garage, "Civic", "2009", Some(dir.join("nope.jpg").as_path()), true);
        assert!(result.is_err());
        assert!(garage.data().cars.is_empty());
    });
}

#[test]
fn test_car_edit_and_remove() {
    with_test_garage(|garage, _dir| {
        cmd_car_add(garage, "Civic", "2009", None, true).unwrap();
        cmd_car_edit(garage, "Civic", "2011", None, true).unwrap();
        assert_eq!(garage.data().car("Civic").unwrap().model_year, "2011");

        cmd_task_add(garage, "Civic", "Oil change", "2024-01-01", true).unwrap();
        cmd_car_remove(garage, "Civic", true).unwrap();
        assert!(garage.data().cars.is_empty());
        assert!(garage.data().maintenance.is_empty());
    });
}

#[test]
fn test_task_add_and_complete() {
    with_test_garage(|garage, _dir| {
        cmd_car_add(garage, "Civic", "2009", None, true).unwrap();
        cmd_task_add(garage, "Civic", "Oil change", "2024-01-01", true).unwrap();
        cmd_task_add(garage, "Civic", "Brakes", "2024-02-01", true).unwrap();

        cmd_task_complete(garage, "Civic", 0, Some("Done at shop"), true).unwrap();

        let data = garage.data();
        assert_eq!(data.pending_for("Civic").len(), 1);
        assert_eq!(data.history_for("Civic")[0].note.as_deref(), Some("Done at shop"));
    });
}

#[test]
fn test_task_done_by_id() {
    with_test_garage(|garage, _dir| {
        cmd_car_add(garage, "Civic", "2009", None, true).unwrap();
        cmd_task_add(garage, "Civic", "Oil change", "2024-01-01", true).unwrap();
        let id = garage.data().pending_for("Civic")[0].id;

        cmd_task_done(garage, id, None, true).unwrap();
        cmd_task_done(garage, id, None, true).unwrap();

        assert!(garage.data().pending_for("Civic").is_empty());
        assert_eq!(garage.data().history_for("Civic").len(), 1);
    });
}

#[test]
fn test_listings_do_not_mutate() {
    with_test_garage(|garage, _dir| {
        cmd_car_add(garage, "Civic", "2009", None, true).unwrap();
        cmd_task_add(garage, "Civic", "Oil change", "2024-01-01", true).unwrap();
        let before = garage.data().clone();

        cmd_car_list(garage);
        cmd_task_list(garage, None);
        cmd_task_list(garage, Some("Civic"));
        cmd_history(garage, Some("Ghost"));

        assert_eq!(garage.data(), &before);
    });
}

#[test]
fn test_legacy_document_gets_ids() {
    with_test_garage(|garage, dir| {
        fs::write(
            dir.join("car_maintenance_data.json"),
            r#"{"cars": {"Civic": {"model_year": "2009", "image_path": ""}},
                "maintenance": {"Civic": [
                    {"task": "Oil change", "due_date": "2024-01-01", "completed": false},
                    {"task": "Brakes", "due_date": "2024-02-01", "completed": false}
                ]},
                "history": {}}"#,
        )
        .unwrap();
        garage.reload().unwrap();

        let ids: Vec<u64> = garage.data().pending_for("Civic").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        cmd_task_done(garage, 2, Some("new pads"), true).unwrap();
        let reopened = Garage::open(&Config::in_dir(&dir)).unwrap();
        assert_eq!(reopened.data().pending_for("Civic")[0].id, 1);
        assert_eq!(reopened.data().history_for("Civic")[0].task, "Brakes");
    });
}
