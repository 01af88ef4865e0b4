//! End-to-end controller behaviour against in-memory and on-disk stores.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use todoboard::board::{Controller, ControllerSettings, EditOutcome, FixedClock, FormMode, ListView};
use todoboard::model::{FieldChange, Progress, StoreConfig, Todo, TodoId};
use todoboard::store::{FileStore, MemoryStore, RetryPolicy, StoreError, TodoStore};

const TODAY: &str = "2026年10月16日";

fn settings() -> ControllerSettings {
    ControllerSettings {
        date_format: "%Y年%-m月%-d日".into(),
        retry: RetryPolicy::none(),
    }
}

fn controller_over<S: TodoStore>(store: S) -> Controller<S> {
    let at = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    let mut c = Controller::with_clock(store, settings(), Box::new(FixedClock(at)));
    c.load().unwrap();
    c
}

fn create<S: TodoStore>(c: &mut Controller<S>, title: &str, progress: Progress, detail: &str) -> Todo {
    c.update_draft(FieldChange::Title(title.into()));
    c.update_draft(FieldChange::Progress(progress));
    c.update_draft(FieldChange::Detail(detail.into()));
    c.submit_create().unwrap()
}

fn ids(todos: &[&Todo]) -> Vec<u64> {
    todos.iter().map(|t| t.id.0).collect()
}

#[test]
fn nth_create_gets_id_n_and_appears_once() {
    let mut c = controller_over(MemoryStore::new());
    for n in 1..=5u64 {
        let todo = create(&mut c, &format!("task {n}"), Progress::NotStarted, "");
        assert_eq!(todo.id, TodoId(n));
        let count = c.state().todos().iter().filter(|t| t.id == TodoId(n)).count();
        assert_eq!(count, 1);
    }
    assert_eq!(c.state().todos().len(), 5);
}

#[test]
fn buy_milk_create_then_edit() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "Buy milk", Progress::NotStarted, "2%");

    assert_eq!(
        c.state().todos(),
        &[Todo {
            id: TodoId(1),
            title: "Buy milk".into(),
            progress: Progress::NotStarted,
            detail: "2%".into(),
            createddate: TODAY.into(),
            updateddate: String::new(),
        }]
    );

    c.begin_edit(TodoId(1)).unwrap();
    assert_eq!(c.state().form_mode(), FormMode::Edit);
    c.edit_field(FieldChange::Progress(Progress::Done)).unwrap();
    let outcome = c.submit_edit().unwrap();

    let todo = &c.state().todos()[0];
    assert_eq!(outcome, EditOutcome::Saved(todo.clone()));
    assert_eq!(todo.id, TodoId(1));
    assert_eq!(todo.progress, Progress::Done);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.createddate, TODAY);
    assert!(!todo.updateddate.is_empty());
    assert_eq!(c.state().form_mode(), FormMode::Create);
}

#[test]
fn edit_replaces_every_user_field() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "Buy milk", Progress::NotStarted, "2%");
    c.begin_edit(TodoId(1)).unwrap();
    c.edit_field(FieldChange::Title("Buy oat milk".into())).unwrap();
    c.edit_field(FieldChange::Detail("1L".into())).unwrap();
    c.edit_field(FieldChange::Progress(Progress::InProgress)).unwrap();
    c.submit_edit().unwrap();

    let stored = c.store().list_all().unwrap();
    assert_eq!(stored, c.state().todos());
    assert_eq!(stored[0].title, "Buy oat milk");
    assert_eq!(stored[0].detail, "1L");
    assert_eq!(stored[0].progress, Progress::InProgress);
}

#[test]
fn delete_removes_matches_locally_and_remotely() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    create(&mut c, "b", Progress::Done, "");
    create(&mut c, "c", Progress::Done, "");

    assert_eq!(c.delete(TodoId(2)).unwrap(), 1);
    let local: Vec<&Todo> = c.state().todos().iter().collect();
    assert_eq!(ids(&local), vec![1, 3]);
    let remote = c.store().list_all().unwrap();
    assert_eq!(remote.iter().map(|t| t.id.0).collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn delete_of_missing_id_is_noop() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    assert_eq!(c.delete(TodoId(42)).unwrap(), 0);
    assert_eq!(c.state().todos().len(), 1);
    assert_eq!(c.store().documents().len(), 1);
}

fn dup(title: &str) -> Todo {
    Todo {
        id: TodoId(4),
        title: title.into(),
        progress: Progress::Done,
        detail: String::new(),
        createddate: String::new(),
        updateddate: String::new(),
    }
}

fn denied() -> StoreError {
    StoreError::Io {
        path: "todos.json".into(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
}

#[test]
fn delete_removes_every_duplicate_document() {
    let mut c = controller_over(MemoryStore::with_documents(vec![dup("first"), dup("second")]));
    assert_eq!(c.state().todos().len(), 2);

    assert_eq!(c.delete(TodoId(4)).unwrap(), 2);
    assert!(c.state().todos().is_empty());
    assert!(c.store().documents().is_empty());
}

#[test]
fn edit_patches_every_duplicate_document() {
    let mut c = controller_over(MemoryStore::with_documents(vec![dup("first"), dup("second")]));
    c.begin_edit(TodoId(4)).unwrap();
    c.edit_field(FieldChange::Title("merged".into())).unwrap();
    c.edit_field(FieldChange::Progress(Progress::InProgress)).unwrap();

    let saved = match c.submit_edit().unwrap() {
        EditOutcome::Saved(todo) => todo,
        other => panic!("expected a saved edit, got {other:?}"),
    };
    assert_eq!(saved.id, TodoId(4));

    let stored = c.store().documents();
    assert_eq!(stored.len(), 2);
    for todo in &stored {
        assert_eq!(todo.title, "merged");
        assert_eq!(todo.progress, Progress::InProgress);
        assert!(!todo.updateddate.is_empty());
    }
    assert_eq!(c.store().calls(), vec!["list_all", "find_by_id", "update", "update"]);

    let local = c.state().todos();
    assert_eq!(local.len(), 2);
    for todo in local {
        assert_eq!(todo.title, "merged");
        assert_eq!(todo.progress, Progress::InProgress);
        assert!(!todo.updateddate.is_empty());
    }
}

#[test]
fn partial_delete_failure_keeps_local_entries() {
    let mut c = controller_over(MemoryStore::with_documents(vec![dup("first"), dup("second")]));
    // find_by_id and the first delete succeed, the second delete fails
    c.store().inject_fault_after(2, denied());

    assert!(c.delete(TodoId(4)).is_err());
    assert_eq!(c.state().todos().len(), 2);
    assert!(c.state().last_error().is_some());
    let remaining = c.store().documents();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "second");
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    create(&mut c, "b", Progress::Done, "");
    c.delete(TodoId(2)).unwrap();
    let next = create(&mut c, "c", Progress::Done, "");
    assert_eq!(next.id, TodoId(3));
}

#[test]
fn done_filter_keeps_relative_order() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    create(&mut c, "b", Progress::NotStarted, "");
    create(&mut c, "c", Progress::Done, "");
    create(&mut c, "d", Progress::InProgress, "");
    create(&mut c, "e", Progress::Done, "");

    c.set_filter(Progress::Done);
    assert_eq!(c.state().list_view(), ListView::Filtered);
    assert_eq!(ids(&c.state().visible_todos()), vec![1, 3, 5]);
    assert!(c.state().visible_todos().iter().all(|t| t.progress == Progress::Done));
}

#[test]
fn in_progress_filter_with_no_matches_is_empty() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    c.set_filter(Progress::InProgress);
    assert!(c.state().visible_todos().is_empty());
}

#[test]
fn create_then_list_all_round_trips() {
    let mut c = controller_over(MemoryStore::new());
    let created = create(&mut c, "Buy milk", Progress::InProgress, "whole");
    let all = c.store().list_all().unwrap();
    assert!(all.contains(&created));
}

#[test]
fn permanent_failure_leaves_state_unchanged() {
    let mut c = controller_over(MemoryStore::new());
    create(&mut c, "a", Progress::Done, "");
    let before = c.state().todos().to_vec();

    c.store().inject_fault(denied());
    c.update_draft(FieldChange::Title("b".into()));
    c.update_draft(FieldChange::Progress(Progress::Done));
    assert!(c.submit_create().is_err());
    assert_eq!(c.state().todos(), before.as_slice());
    assert!(c.state().last_error().is_some());

    // the next success clears the error
    c.submit_create().unwrap();
    assert!(c.state().last_error().is_none());
    assert_eq!(c.state().todos().len(), 2);
}

#[test]
fn file_store_persists_between_sessions() {
    let tmp = TempDir::new().unwrap();
    let config = StoreConfig::default();
    {
        let mut c = controller_over(FileStore::open(tmp.path(), &config));
        create(&mut c, "Buy milk", Progress::NotStarted, "2%");
        create(&mut c, "Walk dog", Progress::InProgress, "");
        c.delete(TodoId(1)).unwrap();
    }

    let mut c = controller_over(FileStore::open(tmp.path(), &config));
    let loaded: Vec<&Todo> = c.state().todos().iter().collect();
    assert_eq!(ids(&loaded), vec![2]);
    let next = create(&mut c, "Pay rent", Progress::Done, "");
    assert_eq!(next.id, TodoId(3));
}
