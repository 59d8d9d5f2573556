//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the persisted `todos` collection.
//! - Keep SQL and column-encoding details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `TodoDraft::validate()` before SQL mutations.
//! - Read paths surface invalid persisted state as errors instead of
//!   guessing.
//! - Partial updates run as one read-modify-write transaction; no operation
//!   leaves a half-applied record behind.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::todo::{Todo, TodoDraft, TodoId, TodoPatch, TodoValidationError};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    description,
    due_date,
    done
FROM todos";

const REQUIRED_COLUMNS: &[&str] = &["id", "description", "due_date", "done"];

/// Canonical text encoding for the `due_date` column.
///
/// `%.f` keeps sub-second precision when present and prints nothing for
/// whole seconds, so values round-trip exactly.
const DUE_DATE_DB_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
    NotMigrated { expected: u32, found: u32 },
    TableMissing(&'static str),
    ColumnMissing {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::NotMigrated { expected, found } => write!(
                f,
                "connection is not migrated: user_version={found}, expected {expected}"
            ),
            Self::TableMissing(table) => write!(f, "required table `{table}` is missing"),
            Self::ColumnMissing { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing todos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListQuery {
    /// Optional completion-status filter. `None` returns every row.
    pub done: Option<bool>,
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    /// Persists one validated draft and returns the stored record.
    fn add_todo(&self, draft: &TodoDraft) -> RepoResult<Todo>;
    /// Gets one todo by id. Absent ids are `Ok(None)`, not an error.
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    /// Lists todos in ascending-id (insertion) order.
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
    /// Applies a partial update and returns the updated record.
    fn update_todo(&mut self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo>;
    /// Removes one todo permanently.
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `NotMigrated` when migrations were never applied.
    /// - `TableMissing`/`ColumnMissing` when the schema does not carry the
    ///   shape this build expects.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn add_todo(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO todos (description, due_date, done) VALUES (?1, ?2, ?3);",
            params![
                draft.description.as_str(),
                due_date_to_db(&draft.due_date),
                i64::from(draft.done),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(draft.clone().into_todo(id))
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        select_todo(self.conn, id)
    }

    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let mut sql = String::from(TODO_SELECT_SQL);
        let mut filters: Vec<Value> = Vec::new();

        if let Some(done) = query.done {
            sql.push_str(" WHERE done = ?");
            filters.push(Value::Integer(i64::from(done)));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(filters))?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn update_todo(&mut self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match select_todo(&tx, id)? {
            Some(todo) => todo,
            None => return Err(RepoError::NotFound(id)),
        };

        let updated = patch.apply_to(&existing);
        tx.execute(
            "UPDATE todos SET description = ?2, due_date = ?3, done = ?4 WHERE id = ?1;",
            params![
                id,
                updated.description.as_str(),
                due_date_to_db(&updated.due_date),
                i64::from(updated.done),
            ],
        )?;

        tx.commit()?;
        Ok(updated)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if found == 0 {
        return Err(RepoError::NotMigrated {
            expected: latest_version(),
            found,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'todos'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::TableMissing("todos"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(todos);")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    for column in REQUIRED_COLUMNS.iter().copied() {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::ColumnMissing {
                table: "todos",
                column,
            });
        }
    }

    Ok(())
}

fn select_todo(conn: &Connection, id: TodoId) -> RepoResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_todo_row(row)?));
    }

    Ok(None)
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let due_date_text: String = row.get("due_date")?;
    let due_date = parse_due_date(&due_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid due_date value `{due_date_text}` in todos.due_date"
        ))
    })?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todos.done"
            )));
        }
    };

    Ok(Todo {
        id: row.get("id")?,
        description: row.get("description")?,
        due_date,
        done,
    })
}

fn due_date_to_db(value: &NaiveDateTime) -> String {
    value.format(DUE_DATE_DB_FORMAT).to_string()
}

fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DUE_DATE_DB_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}
