//! Memo use-case service.
//!
//! # Responsibility
//! - Validate memo input before it reaches the repository.
//! - Return read-back records for created memos.
//!
//! # Invariants
//! - Service APIs never bypass repository write units.
//! - Removing a missing memo is not an error here either.

use crate::model::memo::{MemoId, MemoRecord, MemoValidationError, NewMemo};
use crate::repo::error::{StoreError, StoreResult};
use crate::repo::memo_repo::MemoRepository;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for memo use-cases.
#[derive(Debug)]
pub enum MemoServiceError {
    /// Input rejected before touching storage.
    Validation(MemoValidationError),
    /// Persistence-layer failure.
    Store(StoreError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent memo state: {details}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<MemoValidationError> for MemoServiceError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for MemoServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Memo service facade over repository implementations.
pub struct MemoService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores one memo, returning its id.
    pub fn add_memo(&mut self, memo: &NewMemo) -> Result<MemoId, MemoServiceError> {
        if let Err(err) = memo.validate() {
            warn!("event=memo_create module=service status=rejected reason={err}");
            return Err(err.into());
        }

        let memo_id = self
            .repo
            .create_memo(&memo.title, &memo.body, &memo.tags)?;
        Ok(memo_id)
    }

    /// Same as [`Self::add_memo`] but returns the stored projection.
    pub fn add_memo_with_readback(
        &mut self,
        memo: &NewMemo,
    ) -> Result<MemoRecord, MemoServiceError> {
        let memo_id = self.add_memo(memo)?;
        self.repo
            .get_memo(memo_id)?
            .ok_or(MemoServiceError::InconsistentState(
                "created memo not found in read-back",
            ))
    }

    /// Deletes one memo; returns `0` when the id does not exist.
    pub fn remove_memo(&mut self, memo_id: MemoId) -> StoreResult<usize> {
        self.repo.delete_memo(memo_id)
    }

    pub fn memo_exists(&self, memo_id: MemoId) -> StoreResult<bool> {
        self.repo.memo_exists(memo_id)
    }

    pub fn get_memo(&self, memo_id: MemoId) -> StoreResult<Option<MemoRecord>> {
        self.repo.get_memo(memo_id)
    }

    pub fn list_memos(&self) -> StoreResult<Vec<MemoRecord>> {
        self.repo.list_all()
    }

    pub fn search_keyword(&self, keyword: &str) -> StoreResult<Vec<MemoRecord>> {
        self.repo.search_by_keyword(keyword)
    }

    pub fn search_tags(&self, raw_tags: &str) -> StoreResult<Vec<MemoRecord>> {
        self.repo.search_by_tags(raw_tags)
    }

    pub fn list_tags(&self) -> StoreResult<Vec<String>> {
        self.repo.list_tags()
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoService, MemoServiceError};
    use crate::model::memo::{MemoId, MemoRecord, MemoValidationError, NewMemo};
    use crate::repo::error::StoreResult;
    use crate::repo::memo_repo::MemoRepository;

    /// Records create calls so validation can be checked without SQLite.
    #[derive(Default)]
    struct RecordingRepo {
        created: Vec<(String, String, String)>,
    }

    impl MemoRepository for RecordingRepo {
        fn create_memo(&mut self, title: &str, body: &str, raw_tags: &str) -> StoreResult<MemoId> {
            self.created
                .push((title.to_string(), body.to_string(), raw_tags.to_string()));
            Ok(self.created.len() as MemoId)
        }

        fn delete_memo(&mut self, _memo_id: MemoId) -> StoreResult<usize> {
            Ok(0)
        }

        fn memo_exists(&self, memo_id: MemoId) -> StoreResult<bool> {
            Ok(memo_id >= 1 && memo_id as usize <= self.created.len())
        }

        fn get_memo(&self, _memo_id: MemoId) -> StoreResult<Option<MemoRecord>> {
            Ok(None)
        }

        fn list_all(&self) -> StoreResult<Vec<MemoRecord>> {
            Ok(Vec::new())
        }

        fn search_by_keyword(&self, _keyword: &str) -> StoreResult<Vec<MemoRecord>> {
            Ok(Vec::new())
        }

        fn search_by_tags(&self, _raw_tags: &str) -> StoreResult<Vec<MemoRecord>> {
            Ok(Vec::new())
        }

        fn list_tags(&self) -> StoreResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn add_memo_rejects_empty_title_without_writing() {
        let mut service = MemoService::new(RecordingRepo::default());
        let err = service.add_memo(&NewMemo::new("", "body", "x")).unwrap_err();
        assert!(matches!(
            err,
            MemoServiceError::Validation(MemoValidationError::EmptyTitle)
        ));
        assert!(!service.memo_exists(1).unwrap());
    }

    #[test]
    fn add_memo_passes_raw_tags_through() {
        let mut service = MemoService::new(RecordingRepo::default());
        let id = service
            .add_memo(&NewMemo::new("jacket", "testbody", " a , a, b "))
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(service.repo.created[0].2, " a , a, b ");
    }

    #[test]
    fn readback_missing_reports_inconsistent_state() {
        let mut service = MemoService::new(RecordingRepo::default());
        let err = service
            .add_memo_with_readback(&NewMemo::new("jacket", "testbody", ""))
            .unwrap_err();
        assert!(matches!(err, MemoServiceError::InconsistentState(_)));
    }
}
