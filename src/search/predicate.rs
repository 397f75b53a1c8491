//! Filter predicates and the query descriptor built from [`SearchCriteria`].
//!
//! A [`Filter`] is a conjunction of field predicates plus an optional
//! keyword OR-group. It is built immutably: every `with_*` call consumes the
//! filter and returns a new one. The same filter value feeds both the page
//! fetch and the total count.

use super::sort::SortSpec;
use super::types::SearchCriteria;
use crate::models::{ConstructionStatus, Furnishing, ListingType, Property, PropertyType};
use serde::Serialize;

/// Text fields that support case-insensitive substring matching
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
    Address,
    City,
    State,
}

impl TextField {
    fn value<'a>(&self, property: &'a Property) -> &'a str {
        match self {
            TextField::Title => &property.title,
            TextField::Description => &property.description,
            TextField::Address => &property.location.address,
            TextField::City => &property.location.city,
            TextField::State => &property.location.state,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum NumericField {
    Price,
    Area,
    Bedrooms,
    Bathrooms,
}

impl NumericField {
    /// `None` when the record has no value for the field
    fn value(&self, property: &Property) -> Option<f64> {
        match self {
            NumericField::Price => Some(property.price),
            NumericField::Area => Some(property.area),
            NumericField::Bedrooms => property.bedrooms.map(f64::from),
            NumericField::Bathrooms => property.bathrooms.map(f64::from),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FlagField {
    Featured,
    Verified,
}

/// Exact-match value. The variant names the field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum ExactMatch {
    ListingType(ListingType),
    PropertyType(PropertyType),
    Furnishing(Furnishing),
    ConstructionStatus(ConstructionStatus),
    Owner(String),
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    /// `None` when neither side is set
    pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One condition over a single property record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum Predicate {
    Exact(ExactMatch),
    /// `needle` is stored lowercased
    Contains { field: TextField, needle: String },
    Range { field: NumericField, bounds: Bounds },
    Flag { field: FlagField, value: bool },
}

impl Predicate {
    pub fn contains(field: TextField, needle: &str) -> Self {
        Predicate::Contains {
            field,
            needle: needle.to_lowercase(),
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Predicate::Exact(exact) => match exact {
                ExactMatch::ListingType(v) => property.listing_type == *v,
                ExactMatch::PropertyType(v) => property.property_type == *v,
                ExactMatch::Furnishing(v) => property.furnishing == Some(*v),
                ExactMatch::ConstructionStatus(v) => property.construction_status == Some(*v),
                ExactMatch::Owner(v) => property.owner == *v,
            },
            Predicate::Contains { field, needle } => {
                field.value(property).to_lowercase().contains(needle.as_str())
            }
            Predicate::Range { field, bounds } => {
                field.value(property).map_or(false, |v| bounds.contains(v))
            }
            Predicate::Flag { field, value } => match field {
                FlagField::Featured => property.featured == *value,
                FlagField::Verified => property.verified == *value,
            },
        }
    }
}

/// Conjunction of predicates plus an optional OR-group
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Filter {
    all_of: Vec<Predicate>,
    any_of: Vec<Predicate>,
}

impl Filter {
    /// Filter that matches every property
    pub fn open() -> Self {
        Self::default()
    }

    pub fn with(self, predicate: Predicate) -> Self {
        let mut all_of = self.all_of;
        all_of.push(predicate);
        Self { all_of, ..self }
    }

    pub fn with_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => self.with(predicate),
            None => self,
        }
    }

    /// Replace the OR-group. An empty group places no constraint.
    pub fn with_any_of(self, any_of: Vec<Predicate>) -> Self {
        Self { any_of, ..self }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.all_of
    }

    pub fn any_of(&self) -> &[Predicate] {
        &self.any_of
    }

    pub fn is_open(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty()
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.all_of.iter().all(|p| p.matches(property))
            && (self.any_of.is_empty() || self.any_of.iter().any(|p| p.matches(property)))
    }

    /// Map criteria onto predicates. Each rule is applied independently.
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let exact = |m: Option<ExactMatch>| m.map(Predicate::Exact);
        let text = |field, value: &Option<String>| {
            value.as_deref().map(|needle| Predicate::contains(field, needle))
        };
        let range = |field, min: Option<f64>, max: Option<f64>| {
            Bounds::new(min, max).map(|bounds| Predicate::Range { field, bounds })
        };
        let flag = |field, on: bool| on.then_some(Predicate::Flag { field, value: true });

        let keyword_group: Vec<Predicate> = criteria
            .keyword
            .as_deref()
            .map(|keyword| {
                [TextField::Title, TextField::Description, TextField::Address]
                    .into_iter()
                    .map(|field| Predicate::contains(field, keyword))
                    .collect()
            })
            .unwrap_or_default();

        Filter::open()
            .with_opt(exact(criteria.listing_type.map(ExactMatch::ListingType)))
            .with_opt(exact(criteria.property_type.map(ExactMatch::PropertyType)))
            .with_opt(text(TextField::City, &criteria.city))
            .with_opt(text(TextField::State, &criteria.state))
            .with_opt(range(NumericField::Price, criteria.min_price, criteria.max_price))
            .with_opt(range(
                NumericField::Bedrooms,
                criteria.min_bedrooms.map(f64::from),
                None,
            ))
            .with_opt(range(
                NumericField::Bathrooms,
                criteria.min_bathrooms.map(f64::from),
                None,
            ))
            .with_opt(range(NumericField::Area, criteria.min_area, criteria.max_area))
            .with_opt(exact(criteria.furnishing.map(ExactMatch::Furnishing)))
            .with_opt(exact(
                criteria.construction_status.map(ExactMatch::ConstructionStatus),
            ))
            .with_opt(flag(FlagField::Featured, criteria.featured_only))
            .with_opt(flag(FlagField::Verified, criteria.verified_only))
            .with_any_of(keyword_group)
    }
}

/// Skip/limit pair for one page
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

impl Window {
    /// Window for a 1-based page number
    pub fn for_page(page: u64, page_size: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    /// No skip, no effective limit
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: u64::MAX,
        }
    }
}

/// Fully resolved filter + sort + window, ready for execution
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryDescriptor {
    pub filter: Filter,
    pub sort: SortSpec,
    pub window: Window,
    /// 1-based page the window was derived from
    pub page: u64,
    pub page_size: u64,
}

impl QueryDescriptor {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            filter: Filter::from_criteria(criteria),
            sort: SortSpec::resolve(criteria.sort_key),
            window: Window::for_page(criteria.page, criteria.page_size),
            page: criteria.page,
            page_size: criteria.page_size,
        }
    }
}
