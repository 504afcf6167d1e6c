use chrono::NaiveDate;

/// Earliest dates the date pickers allow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub check_in_min: NaiveDate,
    pub check_out_min: NaiveDate,
}

impl DateBounds {
    /// Check-in may not precede today; check-out may not precede check-in
    /// (or today while no check-in is picked)
    pub fn for_form(today: NaiveDate, check_in: Option<NaiveDate>) -> Self {
        Self {
            check_in_min: today,
            check_out_min: check_in.unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("check-in date is required")]
    MissingCheckIn,

    #[error("check-out date is required")]
    MissingCheckOut,

    #[error("check-in date {check_in} is before today ({today})")]
    CheckInInPast { check_in: NaiveDate, today: NaiveDate },

    #[error("check-out date {check_out} is before check-in date {check_in}")]
    CheckOutBeforeCheckIn { check_in: NaiveDate, check_out: NaiveDate },

    #[error("{0:?} is not a date, expected YYYY-MM-DD")]
    Malformed(String),
}

/// Assert the booking range: both dates present, check-in not in the past,
/// check-out on or after check-in
pub fn validate_dates(
    today: NaiveDate,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
    let check_in = check_in.ok_or(DateRangeError::MissingCheckIn)?;
    let check_out = check_out.ok_or(DateRangeError::MissingCheckOut)?;

    if check_in < today {
        return Err(DateRangeError::CheckInInPast { check_in, today });
    }
    if check_out < check_in {
        return Err(DateRangeError::CheckOutBeforeCheckIn { check_in, check_out });
    }

    Ok((check_in, check_out))
}

/// Parse an ISO `YYYY-MM-DD` date as typed or pasted into the form
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DateRangeError::Malformed(raw.to_string()))
}
