use serde::Deserialize;

use crate::listing::{ListingRequest, SortOrder};

/// Raw query parameters accepted by every listing endpoint.
///
/// Everything is kept as text so that malformed numbers reach
/// [`ListingRequest::from_raw`] instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl From<ListingParams> for ListingRequest {
    fn from(params: ListingParams) -> Self {
        let mut request = ListingRequest::from_raw(params.page.as_deref(), params.limit.as_deref())
            .with_sort(SortOrder::parse(params.sort.as_deref()));
        if let Some(status) = params.status {
            request = request.with_status(status);
        }
        if let Some(search) = params.search {
            request = request.with_search(search);
        }
        request
    }
}
