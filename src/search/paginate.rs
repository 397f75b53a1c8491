//! Query execution: one descriptor in, one page plus total count out.

use super::predicate::QueryDescriptor;
use super::traits::PropertyStore;
use super::types::{Pagination, SearchResponse};
use crate::error::StoreError;
use crate::models::Property;
use serde::Serialize;
use tracing::{debug, warn};

/// One page of matches plus the total across all pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<T = Property> {
    pub items: Vec<T>,
    pub total: u64,
    pub current: u64,
    pub pages: u64,
}

impl<T> ResultPage<T> {
    pub fn into_response(self) -> SearchResponse<T> {
        SearchResponse {
            success: true,
            count: self.items.len(),
            total: self.total,
            pagination: Pagination {
                current: self.current,
                pages: self.pages,
            },
            properties: self.items,
        }
    }
}

/// `ceil(total / page_size)`, zero when nothing matched
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if total == 0 || page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Run a descriptor against a store.
///
/// The page fetch and the count are issued concurrently and both read the
/// descriptor's single filter. Either failing fails the whole call.
pub async fn execute<S>(store: &S, descriptor: &QueryDescriptor) -> Result<ResultPage, StoreError>
where
    S: PropertyStore + ?Sized,
{
    let fetch = store.find(&descriptor.filter, &descriptor.sort, descriptor.window);
    let count = store.count(&descriptor.filter);

    let (items, total) = tokio::try_join!(fetch, count).map_err(|e| {
        warn!(backend = store.backend_name(), error = %e, "Search query failed");
        e
    })?;

    debug!(
        backend = store.backend_name(),
        returned = items.len(),
        total,
        page = descriptor.page,
        "Search executed"
    );

    Ok(ResultPage {
        items,
        total,
        current: descriptor.page,
        pages: total_pages(total, descriptor.page_size),
    })
}
