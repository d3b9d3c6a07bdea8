//! Task repository
//!
//! The authoritative in-memory task list for the running session. Every
//! mutation is mirrored to the [`BoardStore`] on the same turn; the store is
//! never a second source of truth. Mutations on unknown ids are silent
//! no-ops (stale references are not a reportable condition), and a move to
//! the task's current status skips the save entirely to avoid redundant
//! persistence and re-render churn.

use crate::error::{Error, Result};
use crate::store::BoardStore;
use crate::task::{sample_tasks, Status, Task};

/// In-memory task list with persist-on-mutate semantics
#[derive(Debug)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    store: BoardStore,
}

impl TaskRepository {
    /// Load the repository from the store.
    ///
    /// An empty load (first run, or a corrupt file that was discarded) seeds
    /// the three illustrative sample tasks and persists them; saves are
    /// unconditional afterwards, so seeding only ever happens once.
    pub fn load(store: BoardStore) -> Result<Self> {
        let mut tasks = store.load();
        if tasks.is_empty() {
            tasks = sample_tasks();
            store.save(&tasks)?;
        }
        Ok(Self { tasks, store })
    }

    /// Open a repository without seeding (tests and tooling).
    pub fn open_unseeded(store: BoardStore) -> Self {
        let tasks = store.load();
        Self { tasks, store }
    }

    /// The current task list, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Create a task with a fresh id in the To Do column and persist.
    ///
    /// The form state pre-screens titles, but the repository still rejects
    /// an empty or whitespace-only title.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let task = Task::new(title.to_string(), description.to_string());
        self.tasks.push(task.clone());
        self.store.save(&self.tasks)?;
        Ok(task)
    }

    /// Replace a task's title and description, preserving id and status.
    ///
    /// Returns `Ok(false)` without persisting when the id is unknown.
    pub fn update(&mut self, id: &str, title: &str, description: &str) -> Result<bool> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        task.title = title.to_string();
        task.description = description.to_string();
        self.store.save(&self.tasks)?;
        Ok(true)
    }

    /// Remove a task by id. Unknown id is a no-op and does not persist.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(idx) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(idx);
        self.store.save(&self.tasks)?;
        Ok(true)
    }

    /// Move a task to a column.
    ///
    /// No-op (including no save) when the id is unknown or the task is
    /// already in that column.
    pub fn move_to(&mut self, id: &str, status: Status) -> Result<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(false);
        };
        if task.status == status {
            return Ok(false);
        }
        task.status = status;
        self.store.save(&self.tasks)?;
        Ok(true)
    }
}
