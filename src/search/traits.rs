use super::predicate::{Filter, Window};
use super::sort::SortSpec;
use crate::error::{EditError, StoreError};
use crate::models::Property;
use async_trait::async_trait;

/// In-place change to a stored property
pub type Edit<'a> = Box<dyn FnOnce(&mut Property) -> Result<(), EditError> + Send + 'a>;

/// Common trait for property data stores
///
/// A store needs equality, case-insensitive substring and numeric range
/// matching, an OR-group across text fields, counting, and
/// sort-then-skip-then-limit retrieval. Anything that evaluates a [`Filter`]
/// that way can back the search endpoint.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Matching properties ordered by `sort`, restricted to `window`
    async fn find(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        window: Window,
    ) -> Result<Vec<Property>, StoreError>;

    /// Number of matching properties, ignoring any window
    async fn count(&self, filter: &Filter) -> Result<u64, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Property>, StoreError>;

    /// Fetch one property and bump its view counter
    async fn record_view(&self, id: &str) -> Result<Option<Property>, StoreError>;

    async fn insert(&self, property: Property) -> Result<Property, StoreError>;

    /// Apply `edit` to one property atomically with respect to every other
    /// write, including view counting. `Ok(None)` if it does not exist. An
    /// `Err` from `edit` leaves the record unchanged.
    async fn update(&self, id: &str, edit: Edit<'_>) -> Result<Option<Property>, EditError>;

    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Drop every property
    async fn clear(&self) -> Result<(), StoreError>;

    /// Get the name of the storage backend
    fn backend_name(&self) -> &'static str;
}
