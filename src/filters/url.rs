//! Query-string side of the filter state.
//!
//! The listing page reads `city`, `type` and `gender` once when it loads.
//! Later edits stay in the store and are not written back to the address bar.

use ::url::form_urlencoded;

use super::types::{FilterSet, TypeFilter};
use crate::models::Gender;

/// Path of the listing page
pub const LISTING_PATH: &str = "/properties";

/// Seed a filter set from a query string such as `?city=Shimla&type=PG`.
///
/// Unknown keys are ignored. A recognized key with an unrecognized value
/// falls back to that field's default. The first occurrence of a key wins.
pub fn filters_from_query(query: &str) -> FilterSet {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterSet::default();
    let (mut seen_city, mut seen_type, mut seen_gender) = (false, false, false);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "city" if !seen_city => {
                seen_city = true;
                filters.city = value.into_owned();
            }
            "type" if !seen_type => {
                seen_type = true;
                filters.property_type = TypeFilter::parse(&value).unwrap_or_default();
            }
            "gender" if !seen_gender => {
                seen_gender = true;
                filters.gender = Gender::parse(&value).unwrap_or_default();
            }
            _ => {}
        }
    }

    filters
}

/// Link to the listing page carrying the search bar fields, defaults omitted
pub fn search_link(filters: &FilterSet) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !filters.city.is_empty() {
        query.append_pair("city", &filters.city);
    }
    if filters.property_type != TypeFilter::All {
        query.append_pair("type", filters.property_type.as_str());
    }
    if filters.gender != Gender::Any {
        query.append_pair("gender", filters.gender.as_str());
    }

    let query = query.finish();
    if query.is_empty() {
        LISTING_PATH.to_string()
    } else {
        format!("{}?{}", LISTING_PATH, query)
    }
}
