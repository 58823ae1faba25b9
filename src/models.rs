use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A registered vehicle. The car's name is its key in [`Dataset::cars`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Car {
    /// Model year as entered, e.g. "2009".
    pub model_year: String,
    /// Path of the stored image relative to the data directory, or empty.
    #[serde(default)]
    pub image_path: String,
}

/// A maintenance task, pending or completed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceTask {
    /// Stable identifier, unique across the dataset. `0` means not yet assigned.
    #[serde(default)]
    pub id: u64,
    /// What needs to be done.
    pub task: String,
    /// Due date as entered. Not validated.
    pub due_date: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Date the task was completed (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    /// Free-form note recorded at completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MaintenanceTask {
    /// A new pending task.
    pub fn pending(id: u64, task: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            due_date: due_date.into(),
            completed: false,
            completion_date: None,
            note: None,
        }
    }
}

/// Everything carkeep knows: cars, pending maintenance and history.
///
/// Keys of `maintenance` and `history` are car names present in `cars`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    #[serde(default)]
    pub cars: BTreeMap<String, Car>,
    #[serde(default)]
    pub maintenance: BTreeMap<String, Vec<MaintenanceTask>>,
    #[serde(default)]
    pub history: BTreeMap<String, Vec<MaintenanceTask>>,
}

impl Dataset {
    fn all_tasks(&self) -> impl Iterator<Item = &MaintenanceTask> {
        self.maintenance
            .values()
            .chain(self.history.values())
            .flatten()
    }

    /// The id the next created task receives.
    pub fn next_task_id(&self) -> u64 {
        self.all_tasks().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Gives every task without an id (documents written before ids existed) a fresh one.
    ///
    /// Returns how many tasks were numbered.
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut next_id = self.next_task_id();
        let mut assigned = 0;
        for task in self
            .maintenance
            .values_mut()
            .chain(self.history.values_mut())
            .flatten()
            .filter(|t| t.id == 0)
        {
            task.id = next_id;
            next_id += 1;
            assigned += 1;
        }
        assigned
    }

    /// Locates a pending task by id, returning its car and position.
    pub fn find_pending(&self, id: u64) -> Option<(&str, usize)> {
        self.maintenance.iter().find_map(|(car, tasks)| {
            tasks
                .iter()
                .position(|t| t.id == id)
                .map(|index| (car.as_str(), index))
        })
    }
}
