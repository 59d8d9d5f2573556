//! Todo use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for CLI callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::todo::{Todo, TodoDraft, TodoId, TodoPatch};
use crate::repo::todo_repo::{RepoResult, TodoListQuery, TodoRepository};

/// Use-case service wrapper for todo CRUD operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new todo through repository persistence.
    pub fn add(&self, draft: &TodoDraft) -> RepoResult<Todo> {
        self.repo.add_todo(draft)
    }

    /// Gets one todo by id.
    pub fn get(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    /// Lists todos, optionally filtered by completion status.
    pub fn get_all(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(query)
    }

    /// Applies a partial update to an existing todo.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update(&mut self, id: TodoId, patch: &TodoPatch) -> RepoResult<Todo> {
        self.repo.update_todo(id, patch)
    }

    /// Deletes a todo by id.
    pub fn delete(&self, id: TodoId) -> RepoResult<()> {
        self.repo.delete_todo(id)
    }

    /// Marks a todo as completed.
    ///
    /// Shorthand for an update supplying only `done = true`.
    pub fn complete(&mut self, id: TodoId) -> RepoResult<Todo> {
        self.update(
            id,
            &TodoPatch {
                done: Some(true),
                ..TodoPatch::default()
            },
        )
    }

    /// Marks a todo as open again.
    ///
    /// Shorthand for an update supplying only `done = false`; the explicit
    /// `Some(false)` is what distinguishes it from "leave unchanged".
    pub fn reopen(&mut self, id: TodoId) -> RepoResult<Todo> {
        self.update(
            id,
            &TodoPatch {
                done: Some(false),
                ..TodoPatch::default()
            },
        )
    }
}
