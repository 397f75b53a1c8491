use super::types::SortKey;
use crate::models::Property;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Price,
    Area,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Primary sort key. Ties are always broken by `id` ascending so that
/// pages stay stable across requests.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn resolve(key: SortKey) -> Self {
        use SortDirection::*;
        use SortField::*;

        let (field, direction) = match key {
            SortKey::Newest => (CreatedAt, Descending),
            SortKey::Oldest => (CreatedAt, Ascending),
            SortKey::PriceLow => (Price, Ascending),
            SortKey::PriceHigh => (Price, Descending),
            SortKey::AreaLow => (Area, Ascending),
            SortKey::AreaHigh => (Area, Descending),
        };
        Self { field, direction }
    }

    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let primary = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Area => a.area.total_cmp(&b.area),
        };
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::resolve(SortKey::default())
    }
}
