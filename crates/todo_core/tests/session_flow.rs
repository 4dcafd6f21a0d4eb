use chrono::{NaiveDate, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;
use todo_core::{
    FilterMode, KeyValueStore, ManualClock, MemoryKvStore, NewTask, RepoError, RepoResult,
    SortMode, Theme, TodoSession, SEARCH_DEBOUNCE_MS, THEME_KEY,
};

/// Memory store whose writes can be switched to fail.
struct FlakyKvStore {
    inner: MemoryKvStore,
    failing: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if self.failing.get() {
            return Err(RepoError::InvalidData("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn session() -> (
    TodoSession<MemoryKvStore, Rc<ManualClock>>,
    Rc<ManualClock>,
) {
    let clock = Rc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 9, 1, 7, 0, 0).unwrap(),
    ));
    let session = TodoSession::load(MemoryKvStore::new(), Rc::clone(&clock)).unwrap();
    (session, clock)
}

fn visible_titles<K: KeyValueStore>(session: &TodoSession<K, Rc<ManualClock>>) -> Vec<String> {
    session
        .view()
        .rows
        .into_iter()
        .map(|row| row.title)
        .collect()
}

#[test]
fn debounced_search_applies_only_after_quiet_period() {
    let (mut session, clock) = session();
    session.create_task(NewTask::titled("Buy milk")).unwrap();
    clock.advance_millis(1);
    session.create_task(NewTask::titled("Pay bills")).unwrap();

    session.input_search("MI");
    clock.advance_millis(200);
    session.input_search("Milk");
    clock.advance_millis(200);
    assert!(!session.tick());
    assert_eq!(visible_titles(&session).len(), 2);

    clock.advance_millis(SEARCH_DEBOUNCE_MS - 200);
    assert!(session.tick());
    assert_eq!(session.view_state().search, "milk");
    assert_eq!(visible_titles(&session), vec!["Buy milk"]);
    assert!(session.next_tick().is_none());
}

#[test]
fn immediate_search_cancels_pending_input() {
    let (mut session, clock) = session();
    session.create_task(NewTask::titled("Buy milk")).unwrap();

    session.input_search("bills");
    session.set_search("Milk");
    clock.advance_millis(SEARCH_DEBOUNCE_MS);

    assert!(!session.tick());
    assert_eq!(visible_titles(&session), vec!["Buy milk"]);
}

#[test]
fn empty_view_reports_filter_and_query() {
    let (mut session, _clock) = session();
    session.create_task(NewTask::titled("Buy milk")).unwrap();
    session.set_filter(FilterMode::Completed);
    session.set_search("milk");

    let view = session.view();
    assert!(view.rows.is_empty());
    assert_eq!(
        view.empty_message.as_deref(),
        Some("No todos completed matching \"milk\"")
    );
    assert_eq!(view.counts.total, 1);
}

#[test]
fn sort_mode_changes_row_order_only() {
    let (mut session, clock) = session();
    session.create_task(NewTask::titled("first")).unwrap();
    clock.advance_millis(10);
    session.create_task(NewTask::titled("second")).unwrap();

    assert_eq!(visible_titles(&session), vec!["second", "first"]);
    session.set_sort(SortMode::Oldest);
    assert_eq!(visible_titles(&session), vec!["first", "second"]);
    assert_eq!(session.tasks()[0].title, "second");
}

#[test]
fn edit_draft_flow_start_save_and_cancel() {
    let (mut session, _clock) = session();
    let task = session
        .create_task(NewTask::titled("Draft title"))
        .unwrap()
        .unwrap();

    let draft = session.start_edit(task.id).expect("task exists");
    assert_eq!(draft.fields.title, "Draft title");
    draft.fields.title = "   ".to_string();
    assert!(!session.save_edit().unwrap());
    assert!(session.edit_draft().is_some(), "rejected save keeps the draft");
    assert!(session.view().rows[0].editing);

    let draft = session.edit_draft_mut().unwrap();
    draft.fields.title = "Final title".to_string();
    draft.fields.due_date = NaiveDate::from_ymd_opt(2025, 12, 24);
    assert!(session.save_edit().unwrap());
    assert!(session.edit_draft().is_none());
    assert_eq!(session.tasks()[0].title, "Final title");

    session.start_edit(task.id).unwrap().fields.title = "Discarded".to_string();
    session.cancel_edit();
    assert!(session.edit_draft().is_none());
    assert_eq!(session.tasks()[0].title, "Final title");
}

#[test]
fn deleting_the_edited_task_closes_its_draft() {
    let (mut session, _clock) = session();
    let task = session.create_task(NewTask::titled("temp")).unwrap().unwrap();
    session.start_edit(task.id).unwrap();

    assert!(session.delete_task(task.id).unwrap());
    assert!(session.edit_draft().is_none());
    assert!(session.start_edit(task.id).is_none());
}

#[test]
fn failed_delete_still_closes_the_draft_of_the_removed_task() {
    let clock = Rc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 9, 1, 7, 0, 0).unwrap(),
    ));
    let failing = Rc::new(Cell::new(false));
    let kv = FlakyKvStore {
        inner: MemoryKvStore::new(),
        failing: Rc::clone(&failing),
    };
    let mut session = TodoSession::load(kv, Rc::clone(&clock)).unwrap();
    let task = session.create_task(NewTask::titled("temp")).unwrap().unwrap();
    session.start_edit(task.id).unwrap();

    failing.set(true);
    assert!(session.delete_task(task.id).is_err());
    assert!(session.tasks().is_empty());
    assert!(session.edit_draft().is_none());
    assert!(!session.save_edit().unwrap());
}

#[test]
fn theme_toggle_persists_and_restores() {
    let (mut session, clock) = session();
    assert_eq!(session.theme(), Theme::Light);

    assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
    let kv = session.store().repository().kv().clone();
    assert_eq!(kv.raw(THEME_KEY), Some("dark"));

    let restored = TodoSession::load(kv, Rc::clone(&clock)).unwrap();
    assert_eq!(restored.theme(), Theme::Dark);
    assert_eq!(restored.view().theme, Theme::Dark);
}

#[test]
fn reload_restores_tasks_but_resets_view_state() {
    let (mut session, clock) = session();
    let task = session.create_task(NewTask::titled("persist me")).unwrap().unwrap();
    session.toggle_task(task.id).unwrap();
    session.set_filter(FilterMode::Active);

    let kv = session.store().repository().kv().clone();
    let restored = TodoSession::load(kv, clock).unwrap();

    assert_eq!(restored.tasks(), session.tasks());
    assert_eq!(restored.view_state().filter, FilterMode::All);
    assert_eq!(restored.counts().completed, 1);
}

#[test]
fn resolve_id_accepts_unique_prefixes_only() {
    let (mut session, _clock) = session();
    let task = session.create_task(NewTask::titled("one")).unwrap().unwrap();
    let full = task.id.to_string();

    assert_eq!(session.resolve_id(&full), Some(task.id));
    assert_eq!(session.resolve_id(&full[..8].to_uppercase()), Some(task.id));
    assert_eq!(session.resolve_id(""), None);
    assert_eq!(session.resolve_id("not-a-prefix"), None);
}
