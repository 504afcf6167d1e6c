use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::validator::{parse_date, validate_dates, DateBounds, DateRangeError};
use crate::api::{ApiError, PropertyApi};
use crate::config::DEFAULT_REDIRECT_DELAY;
use crate::models::{Booking, BookingRequest};
use crate::services::{AuthSession, Navigator, Route};

pub const BOOKING_FAILED: &str = "Failed to request booking";

#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    CollectingDates,
    Submitting,
    /// Terminal for this form
    Success(Booking),
    /// Message shown to the tenant; dates can be edited and resubmitted
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error("this booking request was already sent")]
    AlreadySubmitted,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A navigation to perform, possibly after a pause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub after: Duration,
}

impl Redirect {
    pub fn now(route: Route) -> Self {
        Self {
            route,
            after: Duration::ZERO,
        }
    }

    pub async fn follow(&self, navigator: &dyn Navigator) {
        if !self.after.is_zero() {
            tokio::time::sleep(self.after).await;
        }
        navigator.navigate(&self.route);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Not signed in; nothing was sent
    LoginRequired(Redirect),
    Requested { booking: Booking, redirect: Redirect },
}

/// Booking sidebar of a property page
#[derive(Debug, Clone)]
pub struct BookingForm {
    property_id: u64,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    state: BookingState,
    redirect_delay: Duration,
}

impl BookingForm {
    pub fn new(property_id: u64) -> Self {
        Self {
            property_id,
            check_in: None,
            check_out: None,
            state: BookingState::CollectingDates,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    pub fn bounds(&self, today: NaiveDate) -> DateBounds {
        DateBounds::for_form(today, self.check_in)
    }

    pub fn set_check_in(&mut self, date: Option<NaiveDate>) {
        if self.edit() {
            self.check_in = date;
        }
    }

    pub fn set_check_out(&mut self, date: Option<NaiveDate>) {
        if self.edit() {
            self.check_out = date;
        }
    }

    /// Fill both dates from `YYYY-MM-DD` text
    pub fn set_dates(&mut self, check_in: &str, check_out: &str) -> Result<(), DateRangeError> {
        let check_in = parse_date(check_in)?;
        let check_out = parse_date(check_out)?;
        self.set_check_in(Some(check_in));
        self.set_check_out(Some(check_out));
        Ok(())
    }

    /// Editing clears a previous error; a sent form no longer takes edits
    fn edit(&mut self) -> bool {
        match self.state {
            BookingState::Success(_) => false,
            BookingState::Error(_) => {
                self.state = BookingState::CollectingDates;
                true
            }
            _ => true,
        }
    }

    pub async fn submit<A>(
        &mut self,
        api: &A,
        auth: &dyn AuthSession,
        today: NaiveDate,
    ) -> Result<SubmitOutcome, BookingError>
    where
        A: PropertyApi + ?Sized,
    {
        if matches!(self.state, BookingState::Success(_)) {
            return Err(BookingError::AlreadySubmitted);
        }
        if !auth.is_authenticated() {
            info!("Booking requires sign-in, redirecting to {}", Route::Login);
            return Ok(SubmitOutcome::LoginRequired(Redirect::now(Route::Login)));
        }

        let (check_in_date, check_out_date) =
            validate_dates(today, self.check_in, self.check_out).map_err(|err| {
                warn!("Booking dates rejected: {}", err);
                err
            })?;

        let request = BookingRequest {
            property_id: self.property_id,
            check_in_date,
            check_out_date,
        };
        self.state = BookingState::Submitting;

        match api.create_booking(&request).await {
            Ok(booking) => {
                info!("✅ Booking {} requested for property {}", booking.id, self.property_id);
                self.state = BookingState::Success(booking.clone());
                Ok(SubmitOutcome::Requested {
                    booking,
                    redirect: Redirect {
                        route: Route::MyBookings,
                        after: self.redirect_delay,
                    },
                })
            }
            Err(err) => {
                warn!("Booking error: {}", err);
                self.state = BookingState::Error(err.user_message(BOOKING_FAILED));
                Err(err.into())
            }
        }
    }
}
