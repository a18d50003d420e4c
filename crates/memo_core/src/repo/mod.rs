//! Repository layer: memo store, tag resolver and their shared error type.
//!
//! # Responsibility
//! - Own every SQL mutation over `memos`, `tags` and `memo_tags`.
//! - Run each mutation inside one scoped write unit.
//!
//! # Invariants
//! - Storage failures are surfaced as typed `StoreError`s, never swallowed.
//! - Deleting a missing memo is a successful no-op.

pub mod error;
pub mod memo_repo;
pub mod tag_repo;
