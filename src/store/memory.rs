use crate::error::{EditError, StoreError};
use crate::models::Property;
use crate::search::{Edit, Filter, PropertyStore, SortSpec, Window};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory property store keyed by id
///
/// Every read works on a snapshot taken under a single read lock, so a
/// fetch and a count issued for the same filter each see a consistent view.
/// Edits and view counts run under the write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    properties: RwLock<HashMap<String, Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn find(
        &self,
        filter: &Filter,
        sort: &SortSpec,
        window: Window,
    ) -> Result<Vec<Property>, StoreError> {
        let mut matched: Vec<Property> = {
            let guard = self.properties.read();
            guard
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        };
        matched.sort_by(|a, b| sort.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(to_usize(window.skip))
            .take(to_usize(window.limit))
            .collect())
    }

    async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        let guard = self.properties.read();
        Ok(guard.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn get(&self, id: &str) -> Result<Option<Property>, StoreError> {
        Ok(self.properties.read().get(id).cloned())
    }

    async fn record_view(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let mut guard = self.properties.write();
        Ok(guard.get_mut(id).map(|property| {
            property.views += 1;
            property.clone()
        }))
    }

    async fn insert(&self, property: Property) -> Result<Property, StoreError> {
        let mut guard = self.properties.write();
        if guard.contains_key(&property.id) {
            return Err(StoreError::Duplicate(property.id));
        }
        debug!(id = %property.id, "Inserted property");
        guard.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    async fn update(&self, id: &str, edit: Edit<'_>) -> Result<Option<Property>, EditError> {
        let mut guard = self.properties.write();
        let Some(slot) = guard.get_mut(id) else {
            return Ok(None);
        };

        let mut draft = slot.clone();
        edit(&mut draft)?;
        *slot = draft.clone();
        debug!(%id, "Updated property");
        Ok(Some(draft))
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.properties.write().remove(id).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.properties.write().clear();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
