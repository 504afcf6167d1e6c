pub mod booking;
pub mod property;

pub use booking::{Booking, BookingRequest, BookingStatus};
pub use property::{Owner, PropertyDetail, PropertySummary};

use serde::{Deserialize, Serialize};

/// Kind of accommodation a listing offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "Guest House")]
    GuestHouse,
}

impl PropertyType {
    /// Value used on the wire and in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Pg => "PG",
            PropertyType::GuestHouse => "Guest House",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PG" => Some(PropertyType::Pg),
            "Guest House" | "GuestHouse" => Some(PropertyType::GuestHouse),
            _ => None,
        }
    }
}

/// Tenant gender a listing accepts. `Any` doubles as the "no preference" filter value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    #[default]
    Any,
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Any => "Any",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Any" => Some(Gender::Any),
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Label shown on cards and filter chips
    pub fn audience(&self) -> &'static str {
        match self {
            Gender::Any => "Any",
            Gender::Male => "Boys",
            Gender::Female => "Girls",
        }
    }
}

/// Food preference offered by the property kitchen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealType {
    Veg,
    #[serde(rename = "Non-Veg")]
    NonVeg,
    Both,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Veg => "Veg",
            MealType::NonVeg => "Non-Veg",
            MealType::Both => "Both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Veg" => Some(MealType::Veg),
            "Non-Veg" | "NonVeg" => Some(MealType::NonVeg),
            "Both" => Some(MealType::Both),
            _ => None,
        }
    }
}
