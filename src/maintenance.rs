//! Maintenance tracker: pending task lists and the move into history.
//!
//! A task goes `pending -> completed` exactly once. Completed tasks are never
//! reopened or deleted, except when their car is removed.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::models::{Dataset, MaintenanceTask};

/// Date format used for completion dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Dataset {
    /// Appends a pending task to the car's list.
    ///
    /// Does nothing if the car is not registered. Returns the new task's id.
    pub fn add_task(&mut self, car_name: &str, task: &str, due_date: &str) -> Option<u64> {
        if !self.has_car(car_name) {
            debug!(car = car_name, "unknown car, task discarded");
            return None;
        }
        let id = self.next_task_id();
        self.maintenance
            .entry(car_name.to_string())
            .or_default()
            .push(MaintenanceTask::pending(id, task, due_date));
        info!(car = car_name, id, task, due_date, "task added");
        Some(id)
    }

    /// Completes the pending task at `index` in the car's list and moves it to history.
    ///
    /// Later tasks shift down one position. The trimmed note is kept only if
    /// non-empty. Does nothing if the car has no pending list or `index` is
    /// out of range. Returns the completed task.
    pub fn complete_task(
        &mut self,
        car_name: &str,
        index: usize,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Option<&MaintenanceTask> {
        let Some(pending) = self.maintenance.get_mut(car_name) else {
            debug!(car = car_name, "no pending tasks for car, completion ignored");
            return None;
        };
        if index >= pending.len() {
            debug!(car = car_name, index, len = pending.len(), "task index out of range");
            return None;
        }

        let mut task = pending.remove(index);
        task.completed = true;
        task.completion_date = Some(today.format(DATE_FORMAT).to_string());
        task.note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        info!(car = car_name, id = task.id, task = %task.task, "task completed");

        let history = self.history.entry(car_name.to_string()).or_default();
        history.push(task);
        history.last()
    }

    /// Completes a pending task addressed by its id instead of its position.
    pub fn complete_task_by_id(
        &mut self,
        id: u64,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Option<&MaintenanceTask> {
        let Some((car, index)) = self.find_pending(id) else {
            debug!(id, "no pending task with this id");
            return None;
        };
        let car = car.to_string();
        self.complete_task(&car, index, note, today)
    }

    /// Pending tasks of one car, in creation order.
    pub fn pending_for(&self, car_name: &str) -> &[MaintenanceTask] {
        self.maintenance.get(car_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Completed tasks of one car, in completion order.
    pub fn history_for(&self, car_name: &str) -> &[MaintenanceTask] {
        self.history.get(car_name).map(Vec::as_slice).unwrap_or(&[])
    }
}
