//! Domain model for memos and their tags.
//!
//! # Responsibility
//! - Define the records exchanged between core and its transport layer.
//! - Own the single tag-list normalization rule used by writes and reads.
//!
//! # Invariants
//! - Memo ids are assigned by storage and never reused.
//! - Tag names compare case-sensitively.

pub mod memo;
pub mod tags;
