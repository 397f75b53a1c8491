mod input;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use input::{NewProperty, PropertyUpdate, MAX_TITLE_LEN};

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[serde(rename = "apartment")]
    Apartment,
    #[serde(rename = "house")]
    House,
    #[serde(rename = "villa")]
    Villa,
    #[serde(rename = "plot")]
    Plot,
    #[serde(rename = "commercial")]
    Commercial,
    #[serde(rename = "office space", alias = "office_space", alias = "office-space")]
    OfficeSpace,
    #[serde(rename = "shop")]
    Shop,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Furnishing {
    #[serde(rename = "unfurnished")]
    Unfurnished,
    #[serde(rename = "semi-furnished", alias = "semi_furnished", alias = "semi furnished")]
    SemiFurnished,
    #[serde(rename = "fully-furnished", alias = "fully_furnished", alias = "fully furnished")]
    FullyFurnished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConstructionStatus {
    #[serde(
        rename = "under construction",
        alias = "under_construction",
        alias = "under-construction"
    )]
    UnderConstruction,
    #[serde(rename = "ready to move", alias = "ready_to_move", alias = "ready-to-move")]
    ReadyToMove,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceUnit {
    #[default]
    #[serde(rename = "total")]
    Total,
    #[serde(rename = "per sq ft", alias = "per_sq_ft")]
    PerSqFt,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "sq ft", alias = "sq_ft")]
    SqFt,
    #[serde(rename = "sq m", alias = "sq_m")]
    SqM,
    #[serde(rename = "acres")]
    Acres,
    #[serde(rename = "hectares")]
    Hectares,
}

/// Parse a query-string value into one of the enums above.
///
/// Values are matched the same way the JSON body is, so every serde alias
/// is accepted. Anything unrecognized yields `None`.
pub fn parse_enum<T>(raw: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_value(serde_json::Value::String(trimmed.to_lowercase())).ok()
}

/// Location information for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// An image hosted by the media service; only the reference is stored here
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(alias = "public_id")]
    pub public_id: String,
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub price_unit: PriceUnit,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub furnishing: Option<Furnishing>,
    #[serde(default)]
    pub construction_status: Option<ConstructionStatus>,
    pub area: f64,
    #[serde(default)]
    pub area_unit: AreaUnit,
    pub location: Location,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub owner: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
