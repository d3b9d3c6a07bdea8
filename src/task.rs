//! Task data model
//!
//! A task is a unit of work with a title, free-text description, and one of
//! exactly three statuses. The serialized form must round-trip exactly:
//! `id`/`title`/`description` as strings and `status` as one of the three
//! column literals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle stage of a task. Every task lives in exactly one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// Column order on the board, left to right.
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    /// Column title shown to the user (same as the serialized literal).
    pub fn title(self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Position of this status in [`Status::ALL`].
    pub fn index(self) -> usize {
        match self {
            Status::ToDo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, assigned at creation, immutable thereafter
    pub id: String,
    /// Non-empty task title
    pub title: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Current column
    pub status: Status,
}

impl Task {
    /// Create a new task with a fresh id. New tasks always start in To Do.
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            status: Status::ToDo,
        }
    }
}

/// Illustrative tasks seeded on first run so the board is not empty.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Design Landing Page".to_string(),
            description: "Create mockups and wireframes for the new landing page.".to_string(),
            status: Status::ToDo,
        },
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Develop API Endpoints".to_string(),
            description: "Set up the required API endpoints for user authentication.".to_string(),
            status: Status::InProgress,
        },
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Deploy Staging Server".to_string(),
            description: "Push the latest build to the staging environment for testing."
                .to_string(),
            status: Status::Done,
        },
    ]
}
