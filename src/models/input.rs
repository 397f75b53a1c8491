//! Request bodies for creating and updating listings

use super::{
    AreaUnit, ConstructionStatus, Furnishing, Image, ListingType, Location, PriceUnit, Property,
    PropertyType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 100;

/// Body of a create request. Identity, ownership and timestamps are
/// assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
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
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be a non-negative number"))
    }
}

fn check_title(title: &str) -> Result<(), String> {
    require("Title", title)?;
    if title.trim().chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title cannot be more than {MAX_TITLE_LEN} characters"));
    }
    Ok(())
}

fn check_location(location: &Location) -> Result<(), String> {
    require("Address", &location.address)?;
    require("City", &location.city)?;
    require("State", &location.state)?;
    require("Pincode", &location.pincode)
}

fn trimmed_location(location: Location) -> Location {
    Location {
        address: location.address.trim().to_string(),
        city: location.city.trim().to_string(),
        state: location.state.trim().to_string(),
        pincode: location.pincode.trim().to_string(),
        ..location
    }
}

impl NewProperty {
    /// Check required fields and bounds. The message is user facing.
    pub fn validate(&self) -> Result<(), String> {
        check_title(&self.title)?;
        require("Description", &self.description)?;
        non_negative("Price", self.price)?;
        non_negative("Area", self.area)?;
        check_location(&self.location)
    }

    pub fn into_property(self, id: String, owner: String, now: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            price_unit: self.price_unit,
            property_type: self.property_type,
            listing_type: self.listing_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            furnishing: self.furnishing,
            construction_status: self.construction_status,
            area: self.area,
            area_unit: self.area_unit,
            location: trimmed_location(self.location),
            amenities: self.amenities,
            images: self.images,
            owner,
            featured: false,
            verified: false,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of an update request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_unit: Option<PriceUnit>,
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub furnishing: Option<Furnishing>,
    pub construction_status: Option<ConstructionStatus>,
    pub area: Option<f64>,
    pub area_unit: Option<AreaUnit>,
    pub location: Option<Location>,
    pub amenities: Option<Vec<String>>,
    /// Already-hosted images appended to the listing
    pub new_images: Vec<Image>,
    /// Public ids of images to drop
    pub delete_images: Vec<String>,
}

impl PropertyUpdate {
    /// Apply the update to a copy of `current`, re-validating what changed.
    pub fn apply(self, current: &Property, now: DateTime<Utc>) -> Result<Property, String> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(description) = &self.description {
            require("Description", description)?;
        }
        if let Some(price) = self.price {
            non_negative("Price", price)?;
        }
        if let Some(area) = self.area {
            non_negative("Area", area)?;
        }
        if let Some(location) = &self.location {
            check_location(location)?;
        }

        let mut images: Vec<Image> = current
            .images
            .iter()
            .filter(|image| !self.delete_images.contains(&image.public_id))
            .cloned()
            .collect();
        images.extend(self.new_images);

        let current = current.clone();
        Ok(Property {
            title: self.title.map(|t| t.trim().to_string()).unwrap_or(current.title),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or(current.description),
            price: self.price.unwrap_or(current.price),
            price_unit: self.price_unit.unwrap_or(current.price_unit),
            property_type: self.property_type.unwrap_or(current.property_type),
            listing_type: self.listing_type.unwrap_or(current.listing_type),
            bedrooms: self.bedrooms.or(current.bedrooms),
            bathrooms: self.bathrooms.or(current.bathrooms),
            furnishing: self.furnishing.or(current.furnishing),
            construction_status: self.construction_status.or(current.construction_status),
            area: self.area.unwrap_or(current.area),
            area_unit: self.area_unit.unwrap_or(current.area_unit),
            location: self.location.map(trimmed_location).unwrap_or(current.location),
            amenities: self.amenities.unwrap_or(current.amenities),
            images,
            updated_at: now,
            ..current
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn listing() -> NewProperty {
        serde_json::from_value(serde_json::json!({
            "title": "  Sea view flat ",
            "description": "Two bed flat near the beach",
            "price": 7500000,
            "propertyType": "apartment",
            "listingType": "sale",
            "bedrooms": 2,
            "area": 950,
            "location": {
                "address": "4 Marine Drive",
                "city": "Mumbai",
                "state": "Maharashtra",
                "pincode": "400002"
            },
            "images": [{"url": "https://img.example/a.jpg", "publicId": "a"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_listing_becomes_property() {
        let new = listing();
        assert!(new.validate().is_ok());

        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let property = new.into_property("id-1".into(), "user-1".into(), now);
        assert_eq!(property.title, "Sea view flat");
        assert_eq!(property.owner, "user-1");
        assert!(!property.featured);
        assert_eq!(property.created_at, now);
    }

    #[test]
    fn test_validation_messages() {
        let mut new = listing();
        new.title = "x".repeat(101);
        assert_eq!(new.validate().unwrap_err(), "Title cannot be more than 100 characters");

        let mut new = listing();
        new.location.city = " ".into();
        assert_eq!(new.validate().unwrap_err(), "City is required");

        let mut new = listing();
        new.price = -1.0;
        assert_eq!(new.validate().unwrap_err(), "Price must be a non-negative number");
    }

    #[test]
    fn test_update_merges_and_edits_images() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let current = listing().into_property("id-1".into(), "user-1".into(), now);

        let update: PropertyUpdate = serde_json::from_value(serde_json::json!({
            "price": 7000000,
            "newImages": [{"url": "https://img.example/b.jpg", "publicId": "b"}],
            "deleteImages": ["a"]
        }))
        .unwrap();

        let updated = update.apply(&current, later).unwrap();
        assert_eq!(updated.price, 7_000_000.0);
        assert_eq!(updated.title, current.title);
        assert_eq!(updated.bedrooms, Some(2));
        assert_eq!(updated.images.len(), 1);
        assert_eq!(updated.images[0].public_id, "b");
        assert_eq!(updated.created_at, now);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let now = Utc::now();
        let current = listing().into_property("id-1".into(), "user-1".into(), now);
        let update = PropertyUpdate {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(update.apply(&current, now).unwrap_err(), "Title is required");
    }
}
