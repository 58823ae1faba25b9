use std::path::Path;

use ratatui::widgets::TableState;
use tracing::error;

use crate::error::Result;
use crate::garage::Garage;
use crate::models::{Car, MaintenanceTask};
use crate::storage::ImageUpload;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Garage,
    Maintenance,
    History,
}

pub enum InputField {
    None,
    ModelYear,
    Image,
    Note,
}

/// A pending task as shown, with its car and position in that car's list.
pub struct PendingRow {
    pub car: String,
    pub index: usize,
    pub task: MaintenanceTask,
}

/// State for the multi-step "Add" wizards.
#[derive(Default)]
pub struct AddState {
    pub name: String,
    pub model_year: String,
    pub task: String,
    pub step: usize, // car: 0 Name, 1 Year, 2 Image | task: 0 Car, 1 Task, 2 Due
}

pub struct App {
    pub garage: Garage,
    pub cars: Vec<(String, Car)>,
    pub pending: Vec<PendingRow>,
    pub history: Vec<(String, MaintenanceTask)>,
    pub state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_car: Option<String>,
    /// Id of the pending task the note prompt completes.
    pub target_id: Option<u64>,
    pub add_state: AddState,
    /// Last error or notice, shown in the help bar until the next action.
    pub message: Option<String>,
}

impl App {
    /// Creates the app around an opened garage and fills the views.
    pub fn new(garage: Garage) -> App {
        let mut app = App {
            garage,
            cars: Vec::new(),
            pending: Vec::new(),
            history: Vec::new(),
            state: TableState::default(),
            view_mode: ViewMode::Garage,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_car: None,
            target_id: None,
            add_state: AddState::default(),
            message: None,
        };
        app.refresh_rows();
        app
    }

    fn row_count(&self) -> usize {
        match self.view_mode {
            ViewMode::Garage => self.cars.len(),
            ViewMode::Maintenance => self.pending.len(),
            ViewMode::History => self.history.len(),
        }
    }

    /// Selects the next row in the current view.
    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous row in the current view.
    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Cycles Garage -> Maintenance -> History.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Garage => ViewMode::Maintenance,
            ViewMode::Maintenance => ViewMode::History,
            ViewMode::History => ViewMode::Garage,
        };
        self.state.select(None);
        self.refresh_selection();
    }

    /// Re-reads the dataset from disk and refreshes the views.
    pub fn reload(&mut self) {
        if let Err(e) = self.garage.reload() {
            self.report(e);
        }
        self.refresh_rows();
    }

    fn refresh_rows(&mut self) {
        let data = self.garage.data();
        self.cars = data
            .cars
            .iter()
            .map(|(name, car)| (name.clone(), car.clone()))
            .collect();
        self.pending = data
            .maintenance
            .iter()
            .flat_map(|(car, tasks)| {
                tasks.iter().enumerate().map(move |(index, task)| PendingRow {
                    car: car.clone(),
                    index,
                    task: task.clone(),
                })
            })
            .collect();
        self.history = data
            .history
            .iter()
            .flat_map(|(car, tasks)| tasks.iter().map(move |t| (car.clone(), t.clone())))
            .collect();
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        let len = self.row_count();
        if len == 0 {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= len {
                self.state.select(Some(len - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    fn report(&mut self, e: crate::error::Error) {
        error!(error = %e, "operation failed");
        self.message = Some(e.to_string());
    }

    fn apply<T>(&mut self, result: Result<T>) -> Option<T> {
        let out = match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.report(e);
                None
            }
        };
        self.refresh_rows();
        out
    }

    fn selected_car(&self) -> Option<String> {
        match self.view_mode {
            ViewMode::Garage => self.state.selected().and_then(|i| self.cars.get(i)).map(|(n, _)| n.clone()),
            ViewMode::Maintenance => self.state.selected().and_then(|i| self.pending.get(i)).map(|r| r.car.clone()),
            ViewMode::History => self.state.selected().and_then(|i| self.history.get(i)).map(|(n, _)| n.clone()),
        }
    }

    /// Removes the selected car with its maintenance and history.
    pub fn delete_selected(&mut self) {
        if self.view_mode != ViewMode::Garage { return; }
        if let Some(name) = self.selected_car() {
            let result = self.garage.remove_car(&name);
            if let Some(true) = self.apply(result) {
                self.message = Some(format!("Removed '{}'", name));
            }
        }
    }

    /// Opens the note prompt for completing the selected pending task.
    pub fn start_complete(&mut self) {
        if self.view_mode != ViewMode::Maintenance { return; }
        let Some((car, id)) = self
            .state
            .selected()
            .and_then(|i| self.pending.get(i))
            .map(|row| (row.car.clone(), row.task.id))
        else {
            return;
        };
        self.target_car = Some(car);
        self.target_id = Some(id);
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::Note;
        self.input_buffer.clear();
    }

    /// Initiates the "Add" wizard: a car in the garage view, a task elsewhere.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
        // Adding a task from the maintenance view starts with the selected car.
        if self.view_mode == ViewMode::Maintenance {
            if let Some(car) = self.selected_car() {
                self.input_buffer = car;
            }
        }
    }

    /// Initiates editing the selected car's model year or image.
    pub fn start_edit(&mut self, field: InputField) {
        if self.view_mode != ViewMode::Garage { return; }
        let Some((name, car)) = self.state.selected().and_then(|i| self.cars.get(i)).cloned() else {
            return;
        };
        self.input_buffer = match field {
            InputField::ModelYear => car.model_year,
            _ => String::new(),
        };
        self.target_car = Some(name);
        self.input_field = field;
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    /// Handles text input based on the current mode.
    pub fn handle_input(&mut self) {
        self.message = None;
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            InputMode::Normal => {}
        }
    }

    fn handle_adding_input(&mut self) {
        let input = self.input_buffer.trim().to_string();
        match (self.view_mode, self.add_state.step) {
            (_, 0) if input.is_empty() => {}
            (ViewMode::Garage, 0) => self.advance(|s| s.name = input),
            (ViewMode::Garage, 1) => self.advance(|s| s.model_year = input),
            (ViewMode::Garage, _) => {
                let upload = self.read_image(&input);
                if let Some(upload) = upload {
                    let name = self.add_state.name.clone();
                    let year = self.add_state.model_year.clone();
                    let result = self.garage.add_car(&name, &year, upload.as_ref());
                    if let Some(false) = self.apply(result) {
                        self.message = Some(format!("'{}' already exists", name));
                    }
                }
                self.cancel_input();
            }
            (_, 0) => self.advance(|s| s.name = input),
            (_, 1) if input.is_empty() => {}
            (_, 1) => self.advance(|s| s.task = input),
            (_, _) => {
                let car = self.add_state.name.clone();
                let task = self.add_state.task.clone();
                let result = self.garage.add_task(&car, &task, &input);
                if let Some(None) = self.apply(result) {
                    self.message = Some(format!("No car named '{}'", car));
                }
                self.cancel_input();
            }
        }
    }

    fn advance(&mut self, set: impl FnOnce(&mut AddState)) {
        set(&mut self.add_state);
        self.add_state.step += 1;
        self.input_buffer.clear();
    }

    /// `Some(None)` for no image, `None` if the file could not be read.
    fn read_image(&mut self, input: &str) -> Option<Option<ImageUpload>> {
        if input.is_empty() {
            return Some(None);
        }
        match ImageUpload::from_path(Path::new(input)) {
            Ok(upload) => Some(Some(upload)),
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    fn handle_editing_input(&mut self) {
        let input = self.input_buffer.trim().to_string();
        let Some(car) = self.target_car.clone() else {
            self.cancel_input();
            return;
        };
        match self.input_field {
            InputField::ModelYear => {
                let result = self.garage.edit_car(&car, &input, None);
                self.apply(result);
            }
            InputField::Image => {
                let year = self.garage.data().car(&car).map(|c| c.model_year.clone());
                if let (Some(year), Some(Some(upload))) = (year, self.read_image(&input)) {
                    let result = self.garage.edit_car(&car, &year, Some(&upload));
                    self.apply(result);
                }
            }
            InputField::Note => {
                if let Some(id) = self.target_id {
                    let note = Some(input.as_str()).filter(|n| !n.is_empty());
                    let result = self.garage.complete_task_by_id(id, note);
                    match self.apply(result) {
                        Some(Some((_, t))) => self.message = Some(format!("Completed '{}'", t.task)),
                        Some(None) => self.message = Some(format!("Task on '{}' is no longer pending", car)),
                        None => {}
                    }
                }
            }
            InputField::None => {}
        }
        self.target_car = None;
        self.target_id = None;
        self.cancel_input();
    }
}
