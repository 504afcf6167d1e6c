//! snake_case records as the API sends them, and their mapping onto the
//! display models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::error::ApiError;
use crate::models::{
    Booking, BookingStatus, Gender, Owner, PropertyDetail, PropertySummary, PropertyType,
};

/// Every payload arrives as `{ "data": ... }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Numeric columns sometimes come back as strings ("6500.00") or null
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn whole(value: Option<f64>) -> u32 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireOwner {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProperty {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    pub city: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_per_month: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub deposit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub available_beds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub review_count: Option<f64>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub owner: Option<WireOwner>,
}

impl WireProperty {
    pub fn into_summary(self) -> PropertySummary {
        PropertySummary {
            id: self.id,
            title: self.title,
            property_type: self.property_type,
            gender: self.gender,
            city: self.city,
            price_per_month: whole(self.price_per_month),
            amenities: self.amenities.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            available_beds: whole(self.available_beds),
            average_rating: self.average_rating.unwrap_or(0.0).clamp(0.0, 5.0) as f32,
            review_count: whole(self.review_count),
        }
    }

    pub fn into_detail(mut self) -> PropertyDetail {
        let address = self.address.take().unwrap_or_default();
        let area = self.area.take();
        let description = self.description.take().unwrap_or_default();
        let deposit = whole(self.deposit);
        let owner = self.owner.take().map(|owner| Owner {
            id: owner.id,
            name: owner.name,
            phone: owner.phone,
            verified: owner.verified,
        });

        PropertyDetail {
            summary: self.into_summary(),
            address,
            area,
            description,
            deposit,
            owner,
        }
    }
}

/// Decode listing records one at a time. A record that does not fit
/// (unknown property type, missing title) is logged and left out.
pub fn decode_listings(records: Vec<Value>) -> Vec<PropertySummary> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<WireProperty>(record) {
            Ok(property) => Some(property.into_summary()),
            Err(e) => {
                warn!("Skipping listing record {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBooking {
    pub id: u64,
    pub status: BookingStatus,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub property: Option<Value>,
}

/// Accepts both `2026-01-10` and full timestamps like `2026-01-10T00:00:00.000Z`
fn parse_wire_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| ApiError::Decode(format!("{} is not a date: {:?}", field, raw)))
}

impl TryFrom<WireBooking> for Booking {
    type Error = ApiError;

    fn try_from(wire: WireBooking) -> Result<Self, Self::Error> {
        let check_in_date = parse_wire_date("check_in_date", &wire.check_in_date)?;
        let check_out_date = parse_wire_date("check_out_date", &wire.check_out_date)?;
        let created_at = wire
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc));
        // nested listings are often partial; a booking is still usable without one
        let property = wire
            .property
            .and_then(|value| serde_json::from_value::<WireProperty>(value).ok())
            .map(WireProperty::into_summary);

        Ok(Booking {
            id: wire.id,
            status: wire.status,
            check_in_date,
            check_out_date,
            created_at,
            property,
        })
    }
}
