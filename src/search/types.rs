use crate::models::{ConstructionStatus, Furnishing, ListingType, PropertyType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
    AreaLow,
    AreaHigh,
}

impl SortKey {
    /// Unrecognized keys fall back to `Newest`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "oldest" => SortKey::Oldest,
            "price_low" => SortKey::PriceLow,
            "price_high" => SortKey::PriceHigh,
            "area_low" => SortKey::AreaLow,
            "area_high" => SortKey::AreaHigh,
            _ => SortKey::Newest,
        }
    }
}

/// Search constraints for one request
///
/// Every `None` means "do not constrain on this field". Built once per
/// request by [`super::criteria::parse_criteria`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyType>,
    /// Case-insensitive substring of `location.city`
    pub city: Option<String>,
    /// Case-insensitive substring of `location.state`
    pub state: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Inclusive lower bound ("N or more")
    pub min_bedrooms: Option<u32>,
    /// Inclusive lower bound ("N or more")
    pub min_bathrooms: Option<u32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub furnishing: Option<Furnishing>,
    pub construction_status: Option<ConstructionStatus>,
    pub featured_only: bool,
    pub verified_only: bool,
    /// Matched against title, description and address
    pub keyword: Option<String>,
    pub page: u64,
    pub page_size: u64,
    pub sort_key: SortKey,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            listing_type: None,
            property_type: None,
            city: None,
            state: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            min_bathrooms: None,
            min_area: None,
            max_area: None,
            furnishing: None,
            construction_status: None,
            featured_only: false,
            verified_only: false,
            keyword: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_key: SortKey::default(),
        }
    }
}

impl SearchCriteria {
    /// Cap the page size, returning a new value. The HTTP layer uses this to
    /// bound a single request.
    pub fn with_page_size_cap(self, cap: Option<u64>) -> Self {
        match cap {
            Some(cap) if cap > 0 && self.page_size > cap => Self {
                page_size: cap,
                ..self
            },
            _ => self,
        }
    }
}

/// Pagination block of the search response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub current: u64,
    pub pages: u64,
}

/// Search response body
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<T> {
    pub success: bool,
    /// Items in this page
    pub count: usize,
    /// Matches across all pages
    pub total: u64,
    pub pagination: Pagination,
    pub properties: Vec<T>,
}
