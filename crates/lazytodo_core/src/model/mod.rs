//! Domain model for the todo datastore.
//!
//! # Responsibility
//! - Define the canonical record shape shared by repository and CLI layers.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `TodoId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod todo;
