use serde::Serialize;

use super::{Gender, PropertyType};

/// Display projection of a listing, as shown on result cards
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub gender: Gender,
    pub city: String,
    pub price_per_month: u32,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub available_beds: u32,
    pub average_rating: f32,
    pub review_count: u32,
}

impl PropertySummary {
    /// First image, if the listing has any
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities
            .iter()
            .any(|a| a.eq_ignore_ascii_case(amenity))
    }
}

/// Owner contact shown on the detail page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Owner {
    pub id: u64,
    pub name: String,
    pub phone: Option<String>,
    pub verified: bool,
}

/// Full listing detail
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub summary: PropertySummary,
    pub address: String,
    pub area: Option<String>,
    pub description: String,
    pub deposit: u32,
    pub owner: Option<Owner>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_image_is_first_image() {
        let mut property = PropertySummary {
            id: 5,
            title: "Hilltop Guest House".to_string(),
            property_type: PropertyType::GuestHouse,
            gender: Gender::Any,
            city: "Shimla".to_string(),
            price_per_month: 9000,
            amenities: vec!["Parking".to_string()],
            images: vec![],
            available_beds: 4,
            average_rating: 0.0,
            review_count: 0,
        };
        assert_eq!(property.cover_image(), None);

        property.images = vec!["front.jpg".to_string(), "room.jpg".to_string()];
        assert_eq!(property.cover_image(), Some("front.jpg"));
        assert!(property.has_amenity("parking"));
    }
}
