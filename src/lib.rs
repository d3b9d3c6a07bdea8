//! kb - Kanban Board Library
//!
//! Core functionality for the kb terminal kanban board: a single-user task
//! board with three fixed columns (To Do, In Progress, Done), JSON file
//! persistence, and optional AI subtask suggestions.
//!
//! # Module Organization
//!
//! - `board`: Column grouping and the transient move-session state
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `repo`: In-memory task collection with write-through persistence
//! - `store`: JSON file storage with atomic writes
//! - `suggest`: Subtask suggestion client for the Gemini API
//! - `task`: Task and status types
//! - `ui`: Terminal user interface built on ratatui

pub mod board;
pub mod config;
pub mod error;
pub mod repo;
pub mod store;
pub mod suggest;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
