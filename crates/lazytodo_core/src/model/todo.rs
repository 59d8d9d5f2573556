//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record persisted by the datastore.
//! - Provide creation/patch request shapes with explicit "not supplied"
//!   semantics for partial updates.
//!
//! # Invariants
//! - `id` is assigned by the store on creation and never reused or mutated.
//! - `description` is non-empty; write paths must call `TodoDraft::validate()`
//!   before SQL mutations.
//! - `done` is a concrete boolean once persisted, never unknown.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = i64;

/// One persisted task record.
///
/// Equality covers all four fields exactly; two records with the same id but
/// different content are not equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned auto-increment id, starting at 1.
    pub id: TodoId,
    /// Task text. Non-empty.
    pub description: String,
    /// When the task is due. Required.
    pub due_date: NaiveDateTime,
    /// Completion flag.
    pub done: bool,
}

impl Display for Todo {
    /// Renders the fixed-width listing line:
    /// id right-aligned to 3 columns, description left-aligned to 20 columns,
    /// due date as `YYYY-MM-DD`, then `[x]` or `[ ]`.
    ///
    /// Values wider than their column are printed in full, not truncated.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:3} {:20} {} {}",
            self.id,
            self.description,
            self.due_date.format("%Y-%m-%d"),
            if self.done { "[x]" } else { "[ ]" }
        )
    }
}

/// Validation error for todo creation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Description is empty or whitespace-only.
    EmptyDescription,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "todo description must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Creation request for one todo record.
///
/// The id is supplied by the store, so drafts carry every field except it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub description: String,
    pub due_date: NaiveDateTime,
    pub done: bool,
}

impl TodoDraft {
    pub fn new(description: impl Into<String>, due_date: NaiveDateTime, done: bool) -> Self {
        Self {
            description: description.into(),
            due_date,
            done,
        }
    }

    /// Checks creation invariants.
    ///
    /// # Errors
    /// - `EmptyDescription` when the description is blank after trimming.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.description.trim().is_empty() {
            return Err(TodoValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Builds the persisted record once the store has assigned an id.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            description: self.description,
            due_date: self.due_date,
            done: self.done,
        }
    }
}

/// Partial-update request for one todo record.
///
/// `None` means "not supplied": the stored value is preserved. `done` is
/// replaced whenever supplied, so `Some(false)` is distinguishable from
/// leaving the flag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Returns the replacement description, if one was effectively supplied.
    ///
    /// A supplied value that is blank after trimming counts as "not
    /// supplied" and preserves the stored description.
    pub fn description_value(&self) -> Option<&str> {
        match self.description.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => None,
        }
    }

    /// Applies this patch on top of an existing record, preserving every
    /// unsupplied field including the id.
    pub fn apply_to(&self, todo: &Todo) -> Todo {
        Todo {
            id: todo.id,
            description: self
                .description_value()
                .map_or_else(|| todo.description.clone(), str::to_owned),
            due_date: self.due_date.unwrap_or(todo.due_date),
            done: self.done.unwrap_or(todo.done),
        }
    }
}
