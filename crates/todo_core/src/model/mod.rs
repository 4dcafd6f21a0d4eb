//! Domain model for the to-do collection and its view preferences.
//!
//! # Responsibility
//! - Define the canonical `Task` record persisted under the `todos` key.
//! - Define the user-facing modes (filter, sort, theme) shared by view and
//!   presentation code.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A task title is never blank once stored.

pub mod preferences;
pub mod task;
