use chrono::NaiveDateTime;
use lazytodo_core::db::migrations::latest_version;
use lazytodo_core::db::{open_db, open_db_in_memory};
use lazytodo_core::{
    RepoError, SqliteTodoRepository, TodoDraft, TodoListQuery, TodoPatch, TodoRepository,
    TodoService,
};
use rusqlite::Connection;

fn due(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn draft(description: &str, due_date: &str, done: bool) -> TodoDraft {
    TodoDraft::new(description, due(due_date), done)
}

#[test]
fn first_add_assigns_id_one() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo
        .add_todo(&draft("Test todo item", "2024-01-02T00:00:00", false))
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.description, "Test todo item");
    assert_eq!(created.due_date, due("2024-01-02T00:00:00"));
    assert!(!created.done);
}

#[test]
fn add_assigns_strictly_increasing_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let first = repo.add_todo(&draft("one", "2024-01-01T00:00:00", false)).unwrap();
    let second = repo.add_todo(&draft("two", "2024-01-02T00:00:00", true)).unwrap();
    let third = repo.add_todo(&draft("three", "2024-01-03T00:00:00", false)).unwrap();

    assert_eq!((first.id, second.id, third.id), (1, 2, 3));
}

#[test]
fn add_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    // Sub-second precision must survive the text column encoding.
    let due_date = NaiveDateTime::parse_from_str(
        "2024-05-17T08:30:00.250",
        "%Y-%m-%dT%H:%M:%S%.f",
    )
    .unwrap();
    let created = repo
        .add_todo(&TodoDraft::new("call the dentist", due_date, true))
        .unwrap();

    let loaded = repo.get_todo(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn get_missing_todo_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    assert!(repo.get_todo(99).unwrap().is_none());
}

#[test]
fn list_returns_all_in_insertion_order() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let first = repo.add_todo(&draft("one", "2024-01-01T00:00:00", false)).unwrap();
    let second = repo.add_todo(&draft("two", "2024-01-02T00:00:00", true)).unwrap();
    let third = repo.add_todo(&draft("three", "2024-01-03T00:00:00", false)).unwrap();

    let todos = repo.list_todos(&TodoListQuery::default()).unwrap();

    assert_eq!(todos, vec![first, second, third]);
}

#[test]
fn list_filters_by_done_status() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let open_a = repo.add_todo(&draft("open a", "2024-01-01T00:00:00", false)).unwrap();
    let done_b = repo.add_todo(&draft("done b", "2024-01-02T00:00:00", true)).unwrap();
    let open_c = repo.add_todo(&draft("open c", "2024-01-03T00:00:00", false)).unwrap();
    let done_d = repo.add_todo(&draft("done d", "2024-01-04T00:00:00", true)).unwrap();

    let completed = repo
        .list_todos(&TodoListQuery { done: Some(true) })
        .unwrap();
    assert_eq!(completed, vec![done_b, done_d]);

    let open = repo
        .list_todos(&TodoListQuery { done: Some(false) })
        .unwrap();
    assert_eq!(open, vec![open_a, open_c]);
}

#[test]
fn list_on_empty_store_returns_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    assert!(repo.list_todos(&TodoListQuery::default()).unwrap().is_empty());
    assert!(repo
        .list_todos(&TodoListQuery { done: Some(true) })
        .unwrap()
        .is_empty());
}

#[test]
fn update_description_preserves_other_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo.add_todo(&draft("draft", "2024-02-01T08:00:00", true)).unwrap();

    let patch = TodoPatch {
        description: Some("final".to_string()),
        ..TodoPatch::default()
    };
    let updated = repo.update_todo(created.id, &patch).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "final");
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.done, created.done);

    let loaded = repo.get_todo(created.id).unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn update_with_blank_description_keeps_stored_value() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo.add_todo(&draft("keep me", "2024-02-01T08:00:00", false)).unwrap();

    let patch = TodoPatch {
        description: Some("   ".to_string()),
        due_date: Some(due("2024-02-05T08:00:00")),
        ..TodoPatch::default()
    };
    let updated = repo.update_todo(created.id, &patch).unwrap();

    assert_eq!(updated.description, "keep me");
    assert_eq!(updated.due_date, due("2024-02-05T08:00:00"));
}

#[test]
fn update_done_false_is_explicit_not_ignored() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo.add_todo(&draft("flagged", "2024-02-01T08:00:00", true)).unwrap();

    // A patch without `done` leaves the flag alone.
    let untouched = repo
        .update_todo(created.id, &TodoPatch::default())
        .unwrap();
    assert!(untouched.done);

    // Supplying `done = false` must flip it, not be mistaken for "absent".
    let reopened = repo
        .update_todo(
            created.id,
            &TodoPatch {
                done: Some(false),
                ..TodoPatch::default()
            },
        )
        .unwrap();
    assert!(!reopened.done);

    let loaded = repo.get_todo(created.id).unwrap().unwrap();
    assert!(!loaded.done);
}

#[test]
fn update_all_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo
        .add_todo(&draft("Test todo item", "2024-01-02T00:00:00", false))
        .unwrap();

    let patch = TodoPatch {
        description: Some("Updated todo item".to_string()),
        due_date: Some(due("2024-01-03T00:00:00")),
        done: Some(true),
    };
    repo.update_todo(created.id, &patch).unwrap();

    let loaded = repo.get_todo(created.id).unwrap().unwrap();
    assert_eq!(loaded.description, "Updated todo item");
    assert_eq!(loaded.due_date, due("2024-01-03T00:00:00"));
    assert!(loaded.done);
}

#[test]
fn update_missing_todo_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let err = repo.update_todo(41, &TodoPatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(41)));
}

#[test]
fn delete_removes_row_and_preserves_other_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let first = repo.add_todo(&draft("one", "2024-01-01T00:00:00", false)).unwrap();
    let second = repo.add_todo(&draft("two", "2024-01-02T00:00:00", false)).unwrap();
    let third = repo.add_todo(&draft("three", "2024-01-03T00:00:00", false)).unwrap();

    repo.delete_todo(second.id).unwrap();

    assert!(repo.get_todo(second.id).unwrap().is_none());
    let remaining = repo.list_todos(&TodoListQuery::default()).unwrap();
    assert_eq!(remaining, vec![first, third]);
}

#[test]
fn delete_missing_todo_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let err = repo.delete_todo(7).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(7)));

    let created = repo.add_todo(&draft("once", "2024-01-01T00:00:00", false)).unwrap();
    repo.delete_todo(created.id).unwrap();
    let err = repo.delete_todo(created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == created.id));
}

#[test]
fn deleted_ids_are_never_reused() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    repo.add_todo(&draft("one", "2024-01-01T00:00:00", false)).unwrap();
    let second = repo.add_todo(&draft("two", "2024-01-02T00:00:00", false)).unwrap();
    repo.delete_todo(second.id).unwrap();

    let replacement = repo.add_todo(&draft("three", "2024-01-03T00:00:00", false)).unwrap();
    assert_eq!(replacement.id, 3);
}

#[test]
fn ids_stay_monotonic_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    {
        let mut conn = open_db(&path).unwrap();
        let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();
        let created = repo.add_todo(&draft("first run", "2024-01-01T00:00:00", false)).unwrap();
        assert_eq!(created.id, 1);
    }

    {
        let mut conn = open_db(&path).unwrap();
        let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();
        let created = repo.add_todo(&draft("second run", "2024-01-02T00:00:00", false)).unwrap();
        assert_eq!(created.id, 2);
        repo.delete_todo(2).unwrap();
    }

    {
        let mut conn = open_db(&path).unwrap();
        let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();
        let created = repo.add_todo(&draft("third run", "2024-01-03T00:00:00", false)).unwrap();
        assert_eq!(created.id, 3, "deleted id must not be reused after reopen");
    }
}

#[test]
fn validation_failure_blocks_add() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let err = repo
        .add_todo(&draft("   ", "2024-01-01T00:00:00", false))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(repo.list_todos(&TodoListQuery::default()).unwrap().is_empty());
}

#[test]
fn service_wraps_repository_calls() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteTodoRepository::try_new(&mut conn).unwrap();
    let mut service = TodoService::new(repo);

    let created = service
        .add(&draft("from service", "2024-03-01T00:00:00", false))
        .unwrap();

    let completed = service.complete(created.id).unwrap();
    assert!(completed.done);

    let reopened = service.reopen(created.id).unwrap();
    assert!(!reopened.done);

    let fetched = service.get(created.id).unwrap().unwrap();
    assert_eq!(fetched, reopened);

    let all = service.get_all(&TodoListQuery::default()).unwrap();
    assert_eq!(all, vec![reopened]);

    service.delete(created.id).unwrap();
    assert!(service.get(created.id).unwrap().is_none());
}

#[test]
fn end_to_end_scenario() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteTodoRepository::try_new(&mut conn).unwrap();

    let created = repo
        .add_todo(&draft("Buy milk", "2024-01-02T00:00:00", false))
        .unwrap();
    assert_eq!(created.id, 1);

    repo.update_todo(
        1,
        &TodoPatch {
            done: Some(true),
            ..TodoPatch::default()
        },
    )
    .unwrap();

    let loaded = repo.get_todo(1).unwrap().unwrap();
    assert_eq!(loaded.description, "Buy milk");
    assert_eq!(loaded.due_date, due("2024-01-02T00:00:00"));
    assert!(loaded.done);

    repo.delete_todo(1).unwrap();
    assert!(repo.list_todos(&TodoListQuery::default()).unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = SqliteTodoRepository::try_new(&mut conn);
    match result {
        Err(RepoError::NotMigrated {
            expected,
            found: 0,
        }) => assert!(expected > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected unmigrated connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_todos_table() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTodoRepository::try_new(&mut conn);
    assert!(matches!(result, Err(RepoError::TableMissing("todos"))));
}

#[test]
fn repository_rejects_connection_missing_required_todos_column() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            done INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTodoRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::ColumnMissing {
            table: "todos",
            column: "due_date"
        })
    ));
}
