use serde::Serialize;

use crate::filters::{FilterSet, TypeFilter};
use crate::models::Gender;

/// Query parameters for the property listing endpoint.
///
/// Only fields that differ from their default are present, so an
/// unfiltered search sends a bare `GET /properties`. Serializes as a list of
/// pairs, which is what reqwest's `.query` encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(Vec<(&'static str, String)>);

impl RequestParams {
    pub fn from_filters(filters: &FilterSet) -> Self {
        let mut params = Vec::new();

        if !filters.city.is_empty() {
            params.push(("city", filters.city.clone()));
        }
        if let TypeFilter::Only(kind) = filters.property_type {
            params.push(("type", kind.as_str().to_string()));
        }
        if filters.gender != Gender::Any {
            params.push(("gender", filters.gender.as_str().to_string()));
        }
        let (min_price, max_price) = filters.price_bounds();
        if let Some(min) = min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if !filters.amenities.is_empty() {
            let joined = filters
                .amenities
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("amenities", joined));
        }
        if let Some(meal) = filters.meal_type {
            params.push(("mealType", meal.as_str().to_string()));
        }
        if filters.min_rating.is_set() {
            params.push(("minRating", filters.min_rating.get().to_string()));
        }

        Self(params)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
