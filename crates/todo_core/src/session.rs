//! Application state object for presentation layers.
//!
//! # Responsibility
//! - Own the task store, view state, theme, search debounce and edit draft
//!   behind one value held by the front end.
//! - Translate user intents (create, toggle, edit-start/save/cancel, delete,
//!   set-filter, set-search, set-sort, toggle-theme) into store calls.
//! - Derive a fresh [`TodoView`] on demand.
//!
//! # Invariants
//! - There is no process-wide mutable state; everything lives here.
//! - Filter, search and sort are session-only; the theme is persisted.
//! - An edit draft survives a rejected save so the user can fix the title.

use crate::clock::Clock;
use crate::model::preferences::{FilterMode, SortMode, Theme};
use crate::model::task::{Task, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::todo_repo::TodoRepository;
use crate::repo::RepoResult;
use crate::search::debounce::SearchDebouncer;
use crate::service::task_store::{NewTask, TaskEdit, TaskStore};
use crate::view::counts::TaskCounts;
use crate::view::model::{build_view, TodoView, ViewState};
use log::{debug, info};

/// In-progress edit of one task, pre-filled from its stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TaskId,
    pub fields: TaskEdit,
}

/// Single owning handle for a running to-do front end.
pub struct TodoSession<K, C> {
    store: TaskStore<K, C>,
    clock: C,
    view: ViewState,
    theme: Theme,
    debouncer: SearchDebouncer,
    draft: Option<EditDraft>,
}

impl<K: KeyValueStore, C: Clock + Clone> TodoSession<K, C> {
    /// Restores tasks and theme from `kv`; view state starts at defaults.
    pub fn load(kv: K, clock: C) -> RepoResult<Self> {
        let repo = TodoRepository::new(kv);
        let theme = repo.load_theme()?;
        let store = TaskStore::load(repo, clock.clone())?;
        info!("event=session_load module=session status=ok theme={theme}");
        Ok(Self {
            store,
            clock,
            view: ViewState::default(),
            theme,
            debouncer: SearchDebouncer::default(),
            draft: None,
        })
    }
}

impl<K: KeyValueStore, C: Clock> TodoSession<K, C> {
    pub fn create_task(&mut self, request: NewTask) -> RepoResult<Option<Task>> {
        self.store.create(request)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> RepoResult<bool> {
        self.store.toggle_completed(id)
    }

    /// Deletes `id` and closes the draft for it.
    ///
    /// The store keeps the removal even when saving fails, so the draft is
    /// closed on both paths.
    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<bool> {
        let result = self.store.delete(id);
        if self
            .draft
            .as_ref()
            .is_some_and(|draft| self.store.get(draft.id).is_none())
        {
            self.draft = None;
        }
        result
    }

    /// Opens an edit draft for `id`, replacing any other open draft.
    ///
    /// Returns `None` when the task does not exist.
    pub fn start_edit(&mut self, id: TaskId) -> Option<&mut EditDraft> {
        let task = self.store.get(id)?;
        let draft = EditDraft {
            id,
            fields: TaskEdit {
                title: task.title.clone(),
                description: task.description.clone(),
                due_date: task.due_date,
            },
        };
        debug!("event=edit_start module=session status=ok");
        Some(self.draft.insert(draft))
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// Applies the open draft. The draft is closed only when the store
    /// accepted the edit.
    pub fn save_edit(&mut self) -> RepoResult<bool> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(false);
        };
        let applied = self.store.edit(draft.id, draft.fields.clone())?;
        if applied {
            self.draft = None;
        }
        Ok(applied)
    }

    pub fn cancel_edit(&mut self) {
        if self.draft.take().is_some() {
            debug!("event=edit_cancel module=session status=ok");
        }
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.view.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.view.sort = sort;
    }

    /// Applies search text immediately, discarding any pending input.
    pub fn set_search(&mut self, text: &str) {
        self.debouncer.cancel();
        self.view.search = text.to_lowercase();
    }

    /// Records typed search text; it is applied by a later [`Self::tick`]
    /// once the debounce window has passed without further input.
    pub fn input_search(&mut self, text: impl Into<String>) {
        self.debouncer.input(text, self.clock.now());
    }

    /// Applies pending search text when due. Returns whether the view
    /// changed.
    pub fn tick(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now()) {
            Some(search) => {
                self.view.search = search;
                true
            }
            None => false,
        }
    }

    /// Instant at which [`Self::tick`] should next be called, if any.
    pub fn next_tick(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.debouncer.deadline()
    }

    /// Flips and persists the theme.
    pub fn toggle_theme(&mut self) -> RepoResult<Theme> {
        let next = self.theme.toggled();
        self.store.repository_mut().save_theme(next)?;
        self.theme = next;
        info!("event=theme_toggle module=session status=ok theme={next}");
        Ok(next)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn counts(&self) -> TaskCounts {
        self.store.counts()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.all()
    }

    /// Resolves a full id or a unique prefix of its hyphenated form.
    pub fn resolve_id(&self, needle: &str) -> Option<TaskId> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .store
            .all()
            .iter()
            .filter(|task| task.id.to_string().starts_with(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id)
    }

    /// Derives the current render output.
    pub fn view(&self) -> TodoView {
        build_view(
            self.store.all(),
            &self.view,
            self.theme,
            self.draft.as_ref().map(|draft| draft.id),
        )
    }

    pub fn store(&self) -> &TaskStore<K, C> {
        &self.store
    }
}
