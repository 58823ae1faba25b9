use chrono::NaiveDate;

use crate::maintenance::DATE_FORMAT;
use crate::models::MaintenanceTask;

/// How a task's due date relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// The task has been completed.
    Done,
    /// Past due by this many days.
    Overdue(i64),
    /// Due today.
    Today,
    /// Due in this many days.
    Upcoming(i64),
    /// The due date is not a `YYYY-MM-DD` date.
    Unscheduled,
}

/// Classifies a task's due date relative to `today`.
///
/// Due dates are stored as entered, so anything that does not parse is
/// reported as [`DueStatus::Unscheduled`] rather than rejected.
pub fn due_status(task: &MaintenanceTask, today: NaiveDate) -> DueStatus {
    if task.completed {
        return DueStatus::Done;
    }
    let Ok(due) = NaiveDate::parse_from_str(task.due_date.trim(), DATE_FORMAT) else {
        return DueStatus::Unscheduled;
    };
    let days_left = (due - today).num_days();
    match days_left {
        d if d < 0 => DueStatus::Overdue(d.abs()),
        0 => DueStatus::Today,
        d => DueStatus::Upcoming(d),
    }
}

impl DueStatus {
    /// Short label for tables, e.g. `3d overdue`.
    pub fn label(&self) -> String {
        match self {
            Self::Done => "Done".to_string(),
            Self::Overdue(d) => format!("{}d overdue", d),
            Self::Today => "Today".to_string(),
            Self::Upcoming(d) => format!("{}d", d),
            Self::Unscheduled => "-".to_string(),
        }
    }

    /// Whether the task needs attention now.
    pub fn is_pressing(&self) -> bool {
        matches!(self, Self::Overdue(_) | Self::Today)
    }
}
