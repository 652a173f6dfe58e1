//! Kanban grouping of the task list.
//!
//! Pure display-side views over the task store's mirror: grouping into
//! status columns and the overdue predicate. Nothing here mutates state or
//! talks to the backend.

use chrono::{DateTime, Utc};
use zudio_types::{Task, TaskStatus};

/// One board column: a status heading and the tasks under it, in the order
/// they appear in the store's list.
#[derive(Debug)]
pub struct BoardColumn<'a> {
    /// Status this column represents.
    pub status: TaskStatus,
    /// Tasks whose status matches.
    pub tasks: Vec<&'a Task>,
}

/// Groups tasks into the four fixed columns, plus an extra bucket for rows
/// whose status the client does not recognize.
///
/// Every task lands in exactly one column. Rows with an out-of-enum status
/// go into a trailing `Unknown` column instead of being dropped, so nothing
/// the backend returned is ever hidden from the board. The unknown column is
/// only present when it has members.
#[must_use]
pub fn group_by_status(tasks: &[Task]) -> Vec<BoardColumn<'_>> {
    let mut columns: Vec<BoardColumn<'_>> = TaskStatus::COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: Vec::new(),
        })
        .collect();
    let mut unknown = BoardColumn {
        status: TaskStatus::Unknown,
        tasks: Vec::new(),
    };

    for task in tasks {
        match TaskStatus::COLUMNS.iter().position(|&s| s == task.status) {
            Some(i) => columns[i].tasks.push(task),
            None => unknown.tasks.push(task),
        }
    }

    if !unknown.tasks.is_empty() {
        columns.push(unknown);
    }
    columns
}

/// Whether a task should carry the overdue indicator: a due date in the
/// past while the task is not done.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.status != TaskStatus::Done && task.due_date.is_some_and(|due| due < now)
}
