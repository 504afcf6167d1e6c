pub mod fetcher;
pub mod session;

pub use fetcher::{FetchOutcome, ListingState, ResultFetcher};
pub use session::SearchSession;

use crate::api::{ApiError, PropertyApi, RequestParams};
use crate::models::PropertySummary;

/// Listings shown on the landing page
pub const FEATURED_COUNT: usize = 3;

/// First `limit` listings of an unfiltered search
pub async fn featured_properties<A>(api: &A, limit: usize) -> Result<Vec<PropertySummary>, ApiError>
where
    A: PropertyApi + ?Sized,
{
    let mut properties = api.list_properties(&RequestParams::default()).await?;
    properties.truncate(limit);
    Ok(properties)
}
