pub mod store;
pub mod types;
pub mod url;

pub use self::url::{filters_from_query, search_link};
pub use store::FilterStore;
pub use types::{ActiveFilter, FilterChip, FilterPatch, FilterSet, MinRating, TypeFilter, KNOWN_AMENITIES};
