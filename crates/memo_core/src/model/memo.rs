//! Memo domain model.
//!
//! # Responsibility
//! - Define the write-side input (`NewMemo`) and read-side projection
//!   (`MemoRecord`).
//! - Provide the non-empty title/body check used ahead of persistence.
//!
//! # Invariants
//! - `MemoRecord::tags` is `None` when the memo has no associated tags.
//! - Tag order inside `MemoRecord::tags` carries no meaning.

use crate::model::tags::TAG_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned memo identifier.
pub type MemoId = i64;

/// Storage-assigned tag identifier.
pub type TagId = i64;

/// Validation failures for memo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoValidationError {
    EmptyTitle,
    EmptyBody,
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::EmptyBody => write!(f, "body is required"),
        }
    }
}

impl Error for MemoValidationError {}

/// Input for creating one memo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMemo {
    pub title: String,
    pub body: String,
    /// Comma-separated tag names, possibly empty.
    #[serde(default)]
    pub tags: String,
}

impl NewMemo {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: tags.into(),
        }
    }

    /// Checks the non-empty title/body precondition of memo creation.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.title.is_empty() {
            return Err(MemoValidationError::EmptyTitle);
        }
        if self.body.is_empty() {
            return Err(MemoValidationError::EmptyBody);
        }
        Ok(())
    }
}

/// Memo row joined with its aggregated tag names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRecord {
    pub id: MemoId,
    pub title: String,
    pub body: String,
    /// Comma-joined tag names, order unspecified.
    pub tags: Option<String>,
}

impl MemoRecord {
    /// Splits the aggregated tag string back into names.
    pub fn tag_names(&self) -> Vec<&str> {
        match self.tags.as_deref() {
            Some(joined) if !joined.is_empty() => joined.split(TAG_SEPARATOR).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoRecord, MemoValidationError, NewMemo};

    #[test]
    fn validate_requires_title_then_body() {
        assert_eq!(
            NewMemo::new("", "", "").validate(),
            Err(MemoValidationError::EmptyTitle)
        );
        assert_eq!(
            NewMemo::new("jacket", "", "").validate(),
            Err(MemoValidationError::EmptyBody)
        );
        assert!(NewMemo::new("jacket", "warm", "").validate().is_ok());
    }

    #[test]
    fn whitespace_only_title_is_accepted() {
        // Only emptiness is checked; trimming is left to callers.
        assert!(NewMemo::new(" ", "body", "").validate().is_ok());
    }

    #[test]
    fn tag_names_handles_missing_and_joined_tags() {
        let mut record = MemoRecord {
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
            tags: None,
        };
        assert!(record.tag_names().is_empty());

        record.tags = Some("x,y".to_string());
        assert_eq!(record.tag_names(), vec!["x", "y"]);
    }

    #[test]
    fn record_serializes_missing_tags_as_null() {
        let record = MemoRecord {
            id: 7,
            title: "skirt".to_string(),
            body: "other".to_string(),
            tags: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json["tags"].is_null());
    }

    #[test]
    fn new_memo_deserializes_without_tags_field() {
        let memo: NewMemo = serde_json::from_str(r#"{"title":"a","body":"b"}"#).unwrap();
        assert_eq!(memo.tags, "");
    }
}
