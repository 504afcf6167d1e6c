//! In-memory stand-ins for the API used across unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::oneshot;

use crate::api::{ApiError, PropertyApi, RequestParams};
use crate::models::{
    Booking, BookingRequest, BookingStatus, Gender, PropertyDetail, PropertySummary, PropertyType,
};

pub(crate) type ListResponse = Result<Vec<PropertySummary>, ApiError>;

pub(crate) fn listing(id: u64, city: &str) -> PropertySummary {
    PropertySummary {
        id,
        title: format!("Listing {}", id),
        property_type: PropertyType::Pg,
        gender: Gender::Any,
        city: city.to_string(),
        price_per_month: 6000,
        amenities: vec!["WiFi".to_string()],
        images: vec![],
        available_beds: 4,
        average_rating: 4.0,
        review_count: 2,
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
pub(crate) struct FakeApi {
    listings: Mutex<Vec<PropertySummary>>,
    list_error: Mutex<Option<ApiError>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<ListResponse>>>,
    list_calls: Mutex<Vec<RequestParams>>,
    booking_error: Mutex<Option<ApiError>>,
    booking_calls: Mutex<Vec<BookingRequest>>,
}

impl FakeApi {
    pub fn with_listings(listings: Vec<PropertySummary>) -> Self {
        let api = Self::default();
        *api.listings.lock().unwrap() = listings;
        api
    }

    pub fn fail_listing(&self, err: Option<ApiError>) {
        *self.list_error.lock().unwrap() = err;
    }

    pub fn fail_booking(&self, err: Option<ApiError>) {
        *self.booking_error.lock().unwrap() = err;
    }

    /// Hold listing requests for `city` until the returned sender fires
    pub fn gate(&self, city: &str) -> oneshot::Sender<ListResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(city.to_string(), rx);
        tx
    }

    pub fn list_calls(&self) -> Vec<RequestParams> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn booking_calls(&self) -> Vec<BookingRequest> {
        self.booking_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PropertyApi for FakeApi {
    async fn list_properties(&self, params: &RequestParams) -> Result<Vec<PropertySummary>, ApiError> {
        self.list_calls.lock().unwrap().push(params.clone());

        let gate = params
            .get("city")
            .and_then(|city| self.gates.lock().unwrap().remove(city));
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".into())));
        }

        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.listings.lock().unwrap().clone())
    }

    async fn get_property(&self, id: u64) -> Result<PropertyDetail, ApiError> {
        let summary = self
            .listings
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ApiError::Rejected {
                status: 404,
                message: Some("Property not found".into()),
            })?;

        Ok(PropertyDetail {
            summary,
            address: String::new(),
            area: None,
            description: String::new(),
            deposit: 0,
            owner: None,
        })
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        self.booking_calls.lock().unwrap().push(request.clone());
        if let Some(err) = self.booking_error.lock().unwrap().clone() {
            return Err(err);
        }

        Ok(Booking {
            id: 100 + self.booking_calls.lock().unwrap().len() as u64,
            status: BookingStatus::Pending,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            created_at: None,
            property: None,
        })
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        Ok(Vec::new())
    }
}
