use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::error::ApiError;
use super::traits::PropertyApi;
use super::types::RequestParams;
use super::wire::{decode_listings, Envelope, WireBooking, WireProperty};
use crate::config::Config;
use crate::models::{Booking, BookingRequest, PropertyDetail, PropertySummary};

/// reqwest-backed client for the marketplace REST API
pub struct HttpPropertyApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpPropertyApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("stay-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Decode(format!("bad endpoint {:?}: {}", path, e)))
    }

    /// Send the request and unwrap the `{ "data": ... }` envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Received {} ({} bytes)", status, body.len());

        if !status.is_success() {
            warn!("API returned status: {}", status);
            return Err(ApiError::rejected(status.as_u16(), &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn list_properties(&self, params: &RequestParams) -> Result<Vec<PropertySummary>, ApiError> {
        let url = self.endpoint("properties")?;
        debug!("Fetching {} with {:?}", url, params);

        let records: Vec<serde_json::Value> = self.send(self.client.get(url).query(params)).await?;

        Ok(decode_listings(records))
    }

    async fn get_property(&self, id: u64) -> Result<PropertyDetail, ApiError> {
        let url = self.endpoint(&format!("properties/{}", id))?;
        debug!("Fetching {}", url);

        let record: WireProperty = self.send(self.client.get(url)).await?;
        Ok(record.into_detail())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        let url = self.endpoint("bookings")?;
        info!(
            "Requesting booking of property {} from {} to {}",
            request.property_id, request.check_in_date, request.check_out_date
        );

        let record: WireBooking = self.send(self.client.post(url).json(request)).await?;
        Booking::try_from(record)
    }

    async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let url = self.endpoint("bookings/my")?;
        debug!("Fetching {}", url);

        let records: Vec<WireBooking> = self.send(self.client.get(url)).await?;
        records.into_iter().map(Booking::try_from).collect()
    }
}
