use async_trait::async_trait;

use super::error::ApiError;
use super::types::RequestParams;
use crate::models::{Booking, BookingRequest, PropertyDetail, PropertySummary};

/// Calls the listing and booking flows make against the marketplace API.
/// Implemented over HTTP by `HttpPropertyApi`; tests plug in fakes.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// `GET /properties` with the given filter parameters
    async fn list_properties(&self, params: &RequestParams) -> Result<Vec<PropertySummary>, ApiError>;

    async fn get_property(&self, id: u64) -> Result<PropertyDetail, ApiError>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError>;

    /// Bookings of the signed-in tenant
    async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError>;
}
