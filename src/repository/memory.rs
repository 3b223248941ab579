//! In-memory [`Collection`] used to exercise listings without a database.

use std::sync::RwLock;

use crate::listing::{Collection, Listable, ListingFilter, SortOrder};
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Vector-backed collection evaluating filters with [`ListingFilter::matches`].
pub struct MemoryCollection<T> {
    records: RwLock<Vec<T>>,
    unavailable: bool,
}

impl<T> MemoryCollection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            unavailable: false,
        }
    }

    /// Collection whose every call fails with a connection error.
    pub fn unavailable() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn insert(&self, record: T) -> RepositoryResult<()> {
        self.records
            .write()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))?
            .push(record);
        Ok(())
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable {
            return Err(RepositoryError::ConnectionError(
                "collection is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl<T: Listable + Clone> Collection<T> for MemoryCollection<T> {
    fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64> {
        self.check_available()?;
        let records = self
            .records
            .read()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))?;
        Ok(records.iter().filter(|r| filter.matches(*r)).count() as u64)
    }

    fn find_matching(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> RepositoryResult<Vec<T>> {
        self.check_available()?;
        let records = self
            .records
            .read()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))?;

        let mut matching: Vec<&T> = records.iter().filter(|r| filter.matches(*r)).collect();
        matching.sort_by(|a, b| sort.compare(*a, *b));

        Ok(matching
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
