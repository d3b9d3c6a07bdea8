//! Board view model
//!
//! Derives the three-column view from the task list and tracks the
//! transient move interaction: at most one task is "picked up" at a time,
//! and each column has an independent hover flag used purely as drop-target
//! feedback. Dropping invokes `move` on the repository; every exit path
//! from a move session clears the picked-up id so the board can never get
//! stuck mid-drag.

use crate::task::{Status, Task};

/// Tasks of one column, in task-list (insertion) order
#[derive(Debug)]
pub struct Column<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

/// Group tasks into the three columns, preserving relative order within each.
pub fn columns(tasks: &[Task]) -> [Column<'_>; 3] {
    Status::ALL.map(|status| Column {
        status,
        tasks: tasks.iter().filter(|task| task.status == status).collect(),
    })
}

/// Transient record of which task is currently being relocated.
///
/// State machine: Idle (no id) → Dragging (pick up sets the id) → drop over
/// a column yields `(id, status)` and returns to Idle. Cancelling, or a
/// drop that targets nothing, also returns to Idle.
#[derive(Debug, Default)]
pub struct DragSession {
    dragged: Option<String>,
}

impl DragSession {
    /// Begin dragging a task, replacing any previous session
    pub fn start(&mut self, task_id: String) {
        self.dragged = Some(task_id);
    }

    /// Id of the task currently being dragged, if any
    pub fn dragged_id(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Drop onto a column. Clears the session and yields the move request;
    /// a drop with no active session yields nothing.
    pub fn drop_on(&mut self, status: Status) -> Option<(String, Status)> {
        self.dragged.take().map(|id| (id, status))
    }

    /// Abandon the session without moving anything
    pub fn cancel(&mut self) {
        self.dragged = None;
    }
}

/// Independent per-column hover flags, presentational only
#[derive(Debug, Default)]
pub struct ColumnHover {
    over: [bool; 3],
}

impl ColumnHover {
    pub fn enter(&mut self, status: Status) {
        self.over[status.index()] = true;
    }

    pub fn leave(&mut self, status: Status) {
        self.over[status.index()] = false;
    }

    pub fn clear(&mut self) {
        self.over = [false; 3];
    }

    pub fn is_over(&self, status: Status) -> bool {
        self.over[status.index()]
    }

    /// Move the hover to a single column, clearing the rest
    pub fn set_only(&mut self, status: Status) {
        self.clear();
        self.enter(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: Status) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            status,
        }
    }

    #[test]
    fn columns_group_by_status_preserving_order() {
        let tasks = vec![
            task("a", Status::Done),
            task("b", Status::ToDo),
            task("c", Status::ToDo),
            task("d", Status::InProgress),
        ];
        let cols = columns(&tasks);

        assert_eq!(cols[0].status, Status::ToDo);
        let todo_ids: Vec<&str> = cols[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo_ids, vec!["b", "c"]);

        assert_eq!(cols[1].tasks.len(), 1);
        assert_eq!(cols[1].tasks[0].id, "d");
        assert_eq!(cols[2].tasks[0].id, "a");
    }

    #[test]
    fn columns_are_present_even_when_empty() {
        let cols = columns(&[]);
        for (col, status) in cols.iter().zip(Status::ALL) {
            assert_eq!(col.status, status);
            assert!(col.tasks.is_empty());
        }
    }

    #[test]
    fn drop_clears_session_and_yields_move() {
        let mut drag = DragSession::default();
        drag.start("a".to_string());
        assert_eq!(drag.dragged_id(), Some("a"));

        let request = drag.drop_on(Status::InProgress);
        assert_eq!(request, Some(("a".to_string(), Status::InProgress)));
        assert!(!drag.is_active());
    }

    #[test]
    fn cancel_returns_to_idle_without_a_move() {
        let mut drag = DragSession::default();
        drag.start("a".to_string());
        drag.cancel();
        assert!(!drag.is_active());
        assert_eq!(drag.drop_on(Status::Done), None);
    }

    #[test]
    fn drop_without_session_yields_nothing() {
        let mut drag = DragSession::default();
        assert_eq!(drag.drop_on(Status::ToDo), None);
    }

    #[test]
    fn hover_flags_are_independent_per_column() {
        let mut hover = ColumnHover::default();
        hover.enter(Status::ToDo);
        hover.enter(Status::Done);
        assert!(hover.is_over(Status::ToDo));
        assert!(!hover.is_over(Status::InProgress));
        assert!(hover.is_over(Status::Done));

        hover.leave(Status::Done);
        assert!(!hover.is_over(Status::Done));

        hover.set_only(Status::InProgress);
        assert!(hover.is_over(Status::InProgress));
        assert!(!hover.is_over(Status::ToDo));
    }
}
