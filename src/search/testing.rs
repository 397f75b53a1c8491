//! Fixtures shared by the search unit tests.

use super::predicate::{Filter, Window};
use super::sort::SortSpec;
use super::traits::{Edit, PropertyStore};
use crate::error::{EditError, StoreError};
use crate::models::{AreaUnit, Location, ListingType, PriceUnit, Property, PropertyType};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

pub fn property(id: &str, price: f64, city: &str, title: &str) -> Property {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Property {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} in {city}"),
        price,
        price_unit: PriceUnit::Total,
        property_type: PropertyType::Apartment,
        listing_type: ListingType::Sale,
        bedrooms: None,
        bathrooms: None,
        furnishing: None,
        construction_status: None,
        area: 500.0,
        area_unit: AreaUnit::SqFt,
        location: Location {
            address: format!("{id} Station Road"),
            city: city.to_string(),
            state: "Maharashtra".to_string(),
            pincode: "411001".to_string(),
            latitude: None,
            longitude: None,
        },
        amenities: vec![],
        images: vec![],
        owner: "owner-1".to_string(),
        featured: false,
        verified: false,
        views: 0,
        created_at: created,
        updated_at: created,
    }
}

/// Store whose reads fail on demand
pub struct FailingStore {
    fail_find: bool,
    fail_count: bool,
}

impl FailingStore {
    pub fn find_fails() -> Self {
        Self {
            fail_find: true,
            fail_count: false,
        }
    }

    pub fn count_fails() -> Self {
        Self {
            fail_find: false,
            fail_count: true,
        }
    }
}

#[async_trait]
impl PropertyStore for FailingStore {
    async fn find(&self, _: &Filter, _: &SortSpec, _: Window) -> Result<Vec<Property>, StoreError> {
        if self.fail_find {
            Err(StoreError::Query("cursor closed".into()))
        } else {
            Ok(vec![])
        }
    }

    async fn count(&self, _: &Filter) -> Result<u64, StoreError> {
        if self.fail_count {
            Err(StoreError::Unavailable("connection refused".into()))
        } else {
            Ok(0)
        }
    }

    async fn get(&self, _: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn record_view(&self, _: &str) -> Result<Option<Property>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert(&self, _: Property) -> Result<Property, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _: &str, _: Edit<'_>) -> Result<Option<Property>, EditError> {
        Err(StoreError::Unavailable("connection refused".into()).into())
    }

    async fn remove(&self, _: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
