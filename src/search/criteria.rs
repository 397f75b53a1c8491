//! Raw query parameters -> [`SearchCriteria`].
//!
//! Parsing never fails. Malformed numbers, unknown enum values and empty
//! strings all degrade to "no constraint".

use super::types::{SearchCriteria, SortKey, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::models::parse_enum;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Look up a parameter by its canonical key, then by its legacy alias.
/// Empty values count as absent.
fn lookup<'a>(params: &'a HashMap<String, String>, key: &str, alias: Option<&str>) -> Option<&'a str> {
    let present = move |k: &str| {
        params
            .get(k)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };
    present(key).or_else(|| alias.and_then(present))
}

/// Parse a number, treating anything unparsable as unset.
pub fn parse_optional_number<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse::<T>().ok())
}

/// Non-negative finite bound, or unset
fn parse_bound(raw: Option<&str>) -> Option<f64> {
    parse_optional_number::<f64>(raw).filter(|v| v.is_finite() && *v >= 0.0)
}

/// Non-negative whole number. Fractions are truncated, so `2.5` reads as 2.
fn parse_whole(raw: Option<&str>) -> Option<u64> {
    parse_bound(raw).map(|v| v.trunc() as u64)
}

fn parse_count(raw: Option<&str>) -> Option<u32> {
    parse_whole(raw).map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Positive page number / size, falling back to `default`
fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    parse_whole(raw).filter(|v| *v > 0).unwrap_or(default)
}

/// Only the literal `"true"` switches a flag on.
fn parse_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn parse_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::to_string)
}

/// Build criteria from raw key/value query parameters.
pub fn parse_criteria(params: &HashMap<String, String>) -> SearchCriteria {
    let get = move |key: &str| lookup(params, key, None);
    let get_or = move |key: &str, alias: &str| lookup(params, key, Some(alias));

    let criteria = SearchCriteria {
        listing_type: get("listingType").and_then(parse_enum),
        property_type: get("propertyType").and_then(parse_enum),
        city: parse_text(get("city")),
        state: parse_text(get("state")),
        min_price: parse_bound(get("minPrice")),
        max_price: parse_bound(get("maxPrice")),
        min_bedrooms: parse_count(get_or("minBedrooms", "bedrooms")),
        min_bathrooms: parse_count(get_or("minBathrooms", "bathrooms")),
        min_area: parse_bound(get("minArea")),
        max_area: parse_bound(get("maxArea")),
        furnishing: get("furnishing").and_then(parse_enum),
        construction_status: get("constructionStatus").and_then(parse_enum),
        featured_only: parse_flag(get_or("featuredOnly", "featured")),
        verified_only: parse_flag(get_or("verifiedOnly", "verified")),
        keyword: parse_text(get("keyword")),
        page: parse_positive(get("page"), DEFAULT_PAGE),
        page_size: parse_positive(get_or("pageSize", "limit"), DEFAULT_PAGE_SIZE),
        sort_key: get_or("sortKey", "sort").map(SortKey::parse).unwrap_or_default(),
    };

    debug!(?criteria, "Parsed search criteria");
    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingType, PropertyType};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_give_defaults() {
        let criteria = parse_criteria(&HashMap::new());
        assert_eq!(criteria, SearchCriteria::default());
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, 10);
        assert_eq!(criteria.sort_key, SortKey::Newest);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = params(&[
            ("city", "Pune"),
            ("minPrice", "100"),
            ("keyword", "garden"),
            ("sortKey", "price_low"),
        ]);
        assert_eq!(parse_criteria(&raw), parse_criteria(&raw));
    }

    #[test]
    fn test_malformed_numbers_are_unset() {
        let criteria = parse_criteria(&params(&[
            ("minPrice", "abc"),
            ("maxArea", "12x"),
            ("minBedrooms", "two"),
        ]));
        assert_eq!(criteria.min_price, None);
        assert_eq!(criteria.max_area, None);
        assert_eq!(criteria.min_bedrooms, None);
        assert_eq!(criteria, parse_criteria(&HashMap::new()));
    }

    #[test]
    fn test_negative_and_non_finite_bounds_are_unset() {
        let criteria = parse_criteria(&params(&[("minPrice", "-5"), ("maxPrice", "inf")]));
        assert_eq!(criteria.min_price, None);
        assert_eq!(criteria.max_price, None);
    }

    #[test]
    fn test_empty_string_is_absent() {
        let criteria = parse_criteria(&params(&[("city", ""), ("keyword", "   ")]));
        assert_eq!(criteria.city, None);
        assert_eq!(criteria.keyword, None);
    }

    #[test]
    fn test_flags_only_accept_literal_true() {
        for value in ["false", "1", "TRUE", "yes"] {
            let criteria = parse_criteria(&params(&[("featuredOnly", value)]));
            assert!(!criteria.featured_only, "{value} must not enable the flag");
        }
        let criteria = parse_criteria(&params(&[("featuredOnly", "true"), ("verifiedOnly", "true")]));
        assert!(criteria.featured_only);
        assert!(criteria.verified_only);
    }

    #[test]
    fn test_page_defaults_on_zero_or_negative() {
        let criteria = parse_criteria(&params(&[("page", "0"), ("pageSize", "-3")]));
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, 10);

        let criteria = parse_criteria(&params(&[("page", "3"), ("pageSize", "500")]));
        assert_eq!(criteria.page, 3);
        assert_eq!(criteria.page_size, 500);
    }

    #[test]
    fn test_fractional_whole_numbers_are_truncated() {
        let criteria = parse_criteria(&params(&[
            ("minBedrooms", "2.5"),
            ("minBathrooms", "1.9"),
            ("page", "2.0"),
            ("pageSize", "12.7"),
        ]));
        assert_eq!(criteria.min_bedrooms, Some(2));
        assert_eq!(criteria.min_bathrooms, Some(1));
        assert_eq!(criteria.page, 2);
        assert_eq!(criteria.page_size, 12);

        let criteria = parse_criteria(&params(&[("page", "0.5"), ("minBedrooms", "-1.5")]));
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.min_bedrooms, None);
    }

    #[test]
    fn test_legacy_aliases() {
        let criteria = parse_criteria(&params(&[
            ("bedrooms", "2"),
            ("bathrooms", "1"),
            ("featured", "true"),
            ("verified", "true"),
            ("limit", "25"),
            ("sort", "area_high"),
        ]));
        assert_eq!(criteria.min_bedrooms, Some(2));
        assert_eq!(criteria.min_bathrooms, Some(1));
        assert!(criteria.featured_only);
        assert!(criteria.verified_only);
        assert_eq!(criteria.page_size, 25);
        assert_eq!(criteria.sort_key, SortKey::AreaHigh);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let criteria = parse_criteria(&params(&[("minBedrooms", "3"), ("bedrooms", "1")]));
        assert_eq!(criteria.min_bedrooms, Some(3));
    }

    #[test]
    fn test_enums_and_unknown_values() {
        let criteria = parse_criteria(&params(&[
            ("listingType", "sale"),
            ("propertyType", "office_space"),
            ("furnishing", "palatial"),
        ]));
        assert_eq!(criteria.listing_type, Some(ListingType::Sale));
        assert_eq!(criteria.property_type, Some(PropertyType::OfficeSpace));
        assert_eq!(criteria.furnishing, None);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let criteria = parse_criteria(&params(&[("sortKey", "cheapest")]));
        assert_eq!(criteria.sort_key, SortKey::Newest);
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number::<u32>(Some(" 4 ")), Some(4));
        assert_eq!(parse_optional_number::<u32>(Some("-1")), None);
        assert_eq!(parse_optional_number::<f64>(Some("12.5")), Some(12.5));
        assert_eq!(parse_optional_number::<f64>(None), None);
    }
}
