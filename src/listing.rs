//! Paginated, filtered listings shared by orders, products and craftsmen.
//!
//! A [`ListingRequest`] is built from untrusted query parameters and always
//! satisfies `page >= 1` and `1 <= limit <= MAX_LIMIT`. [`ListingQuery`] runs
//! it against any [`Collection`] and returns a [`PageResult`] whose navigation
//! flags are derived from the page counters rather than stored.

use std::cmp::Ordering;
use std::num::IntErrorKind;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use thiserror::Error;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Page used when the client sends nothing usable.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the client sends nothing usable.
pub const DEFAULT_LIMIT: u64 = 50;
/// Upper bound on the page size.
pub const MAX_LIMIT: u64 = 1000;
/// Status value meaning "do not filter by status".
pub const ALL_STATUSES: &str = "all";

/// Character used to escape `%`, `_` and itself in `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Record ordering applied to listings.
///
/// Both variants are total orders: the timestamp first, then the record id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    /// Parses the optional `sort` query parameter. Unknown values fall back to
    /// [`SortOrder::NewestFirst`].
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("oldest") | Some("asc") => SortOrder::OldestFirst,
            _ => SortOrder::NewestFirst,
        }
    }

    /// Compares two records according to this order.
    pub fn compare<T: Listable>(self, a: &T, b: &T) -> Ordering {
        let ascending = a.sort_key().cmp(&b.sort_key());
        match self {
            SortOrder::NewestFirst => ascending.reverse(),
            SortOrder::OldestFirst => ascending,
        }
    }
}

/// Records that can be evaluated against a [`ListingFilter`] in memory.
pub trait Listable {
    /// Value compared with the status clause.
    fn listing_status(&self) -> &str;
    /// Text fields inspected by the search clause.
    fn search_fields(&self) -> Vec<&str>;
    /// Timestamp and id pair the listing is ordered by.
    fn sort_key(&self) -> (NaiveDateTime, i32);
}

/// Sanitized listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    page: u64,
    limit: u64,
    status: Option<String>,
    search: Option<String>,
    sort: SortOrder,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: None,
            search: None,
            sort: SortOrder::default(),
        }
    }
}

impl ListingRequest {
    /// Builds a request from numeric values, flooring the page at 1 and
    /// clamping the limit.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: sanitize_page(Some(page)),
            limit: sanitize_limit(Some(limit)),
            ..Self::default()
        }
    }

    /// Builds a request from raw query-string values. Missing or non-numeric
    /// values fall back to the defaults.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: sanitize_page(page.and_then(parse_number)),
            limit: sanitize_limit(limit.and_then(parse_number)),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Number of records skipped before the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Composes the filter clauses carried by this request.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter::new(self.status.as_deref(), self.search.as_deref())
    }
}

/// Parses an integer query value. Overflowing numbers saturate so that a huge
/// limit is still capped rather than replaced by the default.
fn parse_number(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn sanitize_page(page: Option<i64>) -> u64 {
    match page {
        Some(page) if page >= 1 => page as u64,
        _ => DEFAULT_PAGE,
    }
}

fn sanitize_limit(limit: Option<i64>) -> u64 {
    match limit {
        Some(limit) if limit >= 1 => (limit as u64).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

/// Predicate applied to a collection: an optional exact status match AND an
/// optional case-insensitive substring match over the record's search fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    status: Option<String>,
    search: Option<String>,
}

impl ListingFilter {
    /// Blank values and the [`ALL_STATUSES`] sentinel contribute no clause.
    pub fn new(status: Option<&str>, search: Option<&str>) -> Self {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != ALL_STATUSES)
            .map(str::to_string);
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { status, search }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Case-folded `LIKE` pattern for the search clause, escaped with
    /// [`LIKE_ESCAPE`].
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.to_lowercase().chars() {
                if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
                    pattern.push(LIKE_ESCAPE);
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Evaluates the filter against a record held in memory.
    pub fn matches<T: Listable>(&self, record: &T) -> bool {
        if let Some(status) = &self.status
            && record.listing_status() != status.as_str()
        {
            return false;
        }

        match &self.search {
            Some(term) => {
                let needle = term.to_lowercase();
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Storage capability a listing runs against.
pub trait Collection<T> {
    /// Counts every record matching `filter`.
    fn count_matching(&self, filter: &ListingFilter) -> RepositoryResult<u64>;

    /// Loads at most `limit` matching records after skipping `skip` of them,
    /// in `sort` order.
    fn find_matching(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> RepositoryResult<Vec<T>>;
}

/// Failure of a listing. No partial page is ever returned alongside it.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing query failed: {0}")]
    ListingQueryFailed(#[source] RepositoryError),
}

impl ListingError {
    /// Underlying collection error.
    pub fn cause(&self) -> &RepositoryError {
        match self {
            ListingError::ListingQueryFailed(err) => err,
        }
    }
}

/// One page of records with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    items: Vec<T>,
    current_page: u64,
    total_pages: u64,
    total_count: u64,
    limit: u64,
}

impl<T> PageResult<T> {
    /// An empty population always reports page 1, whatever was requested, so
    /// neither navigation flag is set.
    pub fn new(items: Vec<T>, current_page: u64, limit: u64, total_count: u64) -> Self {
        let limit = limit.max(1);
        let current_page = if total_count == 0 {
            1
        } else {
            current_page.max(1)
        };
        Self {
            items,
            current_page,
            total_pages: total_count.div_ceil(limit),
            total_count,
            limit,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// Snapshot of the metadata in its wire shape.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_count: self.total_count,
            limit: self.limit,
            has_next_page: self.has_next_page(),
            has_prev_page: self.has_prev_page(),
        }
    }
}

/// Pagination block of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub limit: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T: Serialize> Serialize for PageResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PageResult", 2)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("pagination", &self.pagination())?;
        state.end()
    }
}

/// Runs listings against a [`Collection`].
pub struct ListingQuery<'a, C: ?Sized> {
    collection: &'a C,
}

impl<'a, C: ?Sized> ListingQuery<'a, C> {
    pub fn new(collection: &'a C) -> Self {
        Self { collection }
    }

    /// Returns the requested page and the metadata describing the whole
    /// matching population.
    pub fn list<T>(&self, request: &ListingRequest) -> Result<PageResult<T>, ListingError>
    where
        C: Collection<T>,
    {
        let filter = request.filter();

        let total = self
            .collection
            .count_matching(&filter)
            .map_err(ListingError::ListingQueryFailed)?;

        let items = self
            .collection
            .find_matching(&filter, request.sort(), request.offset(), request.limit())
            .map_err(ListingError::ListingQueryFailed)?;

        log::debug!(
            "Listed {} of {total} records (page {}, limit {})",
            items.len(),
            request.page(),
            request.limit()
        );

        Ok(PageResult::new(items, request.page(), request.limit(), total))
    }
}
