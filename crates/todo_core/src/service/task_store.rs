//! In-memory task collection backed by the persistence adapter.
//!
//! # Responsibility
//! - Own the ordered task collection loaded at startup.
//! - Apply create/toggle/edit/delete and write the full collection back
//!   after every successful mutation.
//!
//! # Invariants
//! - New tasks are prepended (newest-created first in storage order).
//! - Blank titles and unknown ids are silent no-ops that write nothing.
//! - `priority`, `id` and `created_at` never change after creation.
//! - A failed write surfaces as `Err`; the in-memory change is kept.

use crate::clock::Clock;
use crate::model::task::{normalize_title, Priority, Task, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::todo_repo::TodoRepository;
use crate::repo::RepoResult;
use crate::view::counts::TaskCounts;
use chrono::NaiveDate;
use log::{debug, info};

/// Input for [`TaskStore::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl NewTask {
    /// Starts a request with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Input for [`TaskStore::edit`]. Every field replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

/// Ordered task collection with write-through persistence.
pub struct TaskStore<K, C> {
    repo: TodoRepository<K>,
    clock: C,
    tasks: Vec<Task>,
}

impl<K: KeyValueStore, C: Clock> TaskStore<K, C> {
    /// Loads the persisted collection once and keeps it in memory.
    pub fn load(repo: TodoRepository<K>, clock: C) -> RepoResult<Self> {
        let tasks = repo.load_tasks()?;
        info!(
            "event=store_load module=store status=ok count={}",
            tasks.len()
        );
        Ok(Self { repo, clock, tasks })
    }

    /// Creates a task and prepends it.
    ///
    /// Returns `Ok(None)` without persisting when the title is blank.
    pub fn create(&mut self, request: NewTask) -> RepoResult<Option<Task>> {
        let Some(task) = Task::new(
            &request.title,
            &request.description,
            request.due_date,
            request.priority,
            self.clock.now(),
        ) else {
            debug!("event=task_create module=store status=skip reason=blank_title");
            return Ok(None);
        };

        self.tasks.insert(0, task.clone());
        self.persist()?;
        info!(
            "event=task_create module=store status=ok priority={} total={}",
            task.priority,
            self.tasks.len()
        );
        Ok(Some(task))
    }

    /// Flips completion on the task with `id`.
    ///
    /// Returns `Ok(false)` without persisting when the id is unknown.
    pub fn toggle_completed(&mut self, id: TaskId) -> RepoResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=skip reason=not_found");
            return Ok(false);
        };
        task.completed = !task.completed;
        let completed = task.completed;

        self.persist()?;
        info!("event=task_toggle module=store status=ok completed={completed}");
        Ok(true)
    }

    /// Replaces title, description and due date of the task with `id`.
    ///
    /// The whole edit is rejected (`Ok(false)`) when the new title is blank
    /// or the id is unknown.
    pub fn edit(&mut self, id: TaskId, edit: TaskEdit) -> RepoResult<bool> {
        let Some(title) = normalize_title(&edit.title) else {
            debug!("event=task_edit module=store status=skip reason=blank_title");
            return Ok(false);
        };
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_edit module=store status=skip reason=not_found");
            return Ok(false);
        };

        task.title = title;
        task.description = edit.description.trim().to_string();
        task.due_date = edit.due_date;

        self.persist()?;
        info!("event=task_edit module=store status=ok");
        Ok(true)
    }

    /// Removes the task with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_delete module=store status=skip reason=not_found");
            return Ok(false);
        }

        self.persist()?;
        info!(
            "event=task_delete module=store status=ok total={}",
            self.tasks.len()
        );
        Ok(true)
    }

    /// Read-only view of the collection in storage order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Counts over the whole collection, ignoring any view filter.
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    pub fn repository(&self) -> &TodoRepository<K> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut TodoRepository<K> {
        &mut self.repo
    }

    fn persist(&mut self) -> RepoResult<()> {
        self.repo.save_tasks(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, TaskEdit, TaskStore};
    use crate::clock::ManualClock;
    use crate::model::task::Priority;
    use crate::repo::kv_store::MemoryKvStore;
    use crate::repo::todo_repo::TodoRepository;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn empty_store() -> TaskStore<MemoryKvStore, ManualClock> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap());
        TaskStore::load(TodoRepository::new(MemoryKvStore::new()), clock)
            .expect("empty store should load")
    }

    #[test]
    fn create_prepends_and_persists() {
        let mut store = empty_store();
        let first = store.create(NewTask::titled("first")).unwrap().unwrap();
        let second = store.create(NewTask::titled("second")).unwrap().unwrap();

        let ids: Vec<_> = store.all().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(store.repository().kv().write_count(), 2);
    }

    #[test]
    fn blank_title_creates_nothing_and_writes_nothing() {
        let mut store = empty_store();
        assert!(store.create(NewTask::titled("  \t")).unwrap().is_none());
        assert!(store.all().is_empty());
        assert_eq!(store.repository().kv().write_count(), 0);
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut store = empty_store();
        store.create(NewTask::titled("only")).unwrap();
        let missing = Uuid::new_v4();

        assert!(!store.toggle_completed(missing).unwrap());
        assert!(!store.delete(missing).unwrap());
        assert!(!store
            .edit(missing, TaskEdit {
                title: "renamed".to_string(),
                ..TaskEdit::default()
            })
            .unwrap());
        assert_eq!(store.repository().kv().write_count(), 1);
    }

    #[test]
    fn edit_keeps_priority_and_identity() {
        let mut store = empty_store();
        let created = store
            .create(NewTask {
                title: "draft".to_string(),
                description: "old".to_string(),
                due_date: None,
                priority: Priority::Medium,
            })
            .unwrap()
            .unwrap();

        let due = NaiveDate::from_ymd_opt(2025, 6, 30);
        let applied = store
            .edit(
                created.id,
                TaskEdit {
                    title: " final ".to_string(),
                    description: " new ".to_string(),
                    due_date: due,
                },
            )
            .unwrap();
        assert!(applied);

        let task = store.get(created.id).unwrap();
        assert_eq!(task.title, "final");
        assert_eq!(task.description, "new");
        assert_eq!(task.due_date, due);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.created_at, created.created_at);
    }
}
