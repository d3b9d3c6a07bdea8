//! Persistent store for the board
//!
//! The whole board lives in one JSON file: a serialized array of tasks.
//! Saves overwrite the file unconditionally after every mutation; loads
//! tolerate a missing or corrupt file by returning an empty list so the
//! caller can seed sample data. There is a single writer (the UI thread),
//! so no locking is needed, but writes still go through a temp file +
//! rename so a crash mid-write never leaves a truncated board behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::task::Task;

/// File name of the board slot inside the data directory
pub const BOARD_FILE: &str = "board.json";

/// Storage manager for the board file
#[derive(Debug, Clone)]
pub struct BoardStore {
    path: PathBuf,
}

impl BoardStore {
    /// Create a store backed by the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last saved task list.
    ///
    /// Returns an empty list when the file does not exist or cannot be
    /// parsed. Corrupt data is a recoverable condition: it is logged and
    /// the board starts empty rather than failing.
    pub fn load(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %err, "failed to read board file");
                }
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "board file is corrupt, starting with an empty board"
                );
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the slot with the full task list.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(json.as_bytes())
    }

    /// Write data using temp file + rename so readers never see a partial file.
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> BoardStore {
        BoardStore::new(temp.path().join(BOARD_FILE))
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let temp = TempDir::new().unwrap();
        assert!(store_in(&temp).load().is_empty());
    }

    #[test]
    fn load_corrupt_file_returns_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let tasks = vec![
            Task {
                id: "a".to_string(),
                title: "First".to_string(),
                description: "with text".to_string(),
                status: Status::ToDo,
            },
            Task {
                id: "b".to_string(),
                title: "Second".to_string(),
                description: String::new(),
                status: Status::Done,
            },
        ];

        store.save(&tasks).unwrap();
        assert_eq!(store.load(), tasks);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let first = vec![Task::new("One".to_string(), String::new())];
        store.save(&first).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = BoardStore::new(temp.path().join("nested/dir").join(BOARD_FILE));
        store.save(&[]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn status_literals_in_file_match_slot_format() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let mut task = Task::new("Ship it".to_string(), String::new());
        task.status = Status::InProgress;
        store.save(&[task]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"In Progress\""));
    }
}
