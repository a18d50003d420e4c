//! Read paths over memos.
//!
//! # Responsibility
//! - Expose list-all, keyword and tag-intersection queries.
//! - Keep result shaping (`MemoRecord` projection) inside core.

pub mod memo_query;
