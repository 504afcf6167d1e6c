pub mod form;
pub mod validator;

pub use form::{BookingError, BookingForm, BookingState, Redirect, SubmitOutcome, BOOKING_FAILED};
pub use validator::{parse_date, validate_dates, DateBounds, DateRangeError};
