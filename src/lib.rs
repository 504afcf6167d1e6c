//! Client core of a PG and guest-house rental marketplace: listing search
//! with filters seeded from the page URL, and booking requests with date
//! validation.

pub mod api;
pub mod booking;
pub mod config;
pub mod filters;
pub mod listing;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiError, HttpPropertyApi, PropertyApi, RequestParams};
pub use booking::{BookingError, BookingForm, BookingState, SubmitOutcome};
pub use config::Config;
pub use filters::{FilterChip, FilterPatch, FilterSet, FilterStore};
pub use listing::{FetchOutcome, ListingState, ResultFetcher, SearchSession};
pub use services::{AuthSession, Navigator, Route};
