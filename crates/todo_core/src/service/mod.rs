//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate persistence calls into task-level operations.
//! - Keep presentation code decoupled from storage details.

pub mod task_store;
