//! Stay pricing: night count between two dates and the confirmed booking record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StayError};
use crate::models::{Booking, Hotel, MAX_GUESTS, MIN_GUESTS};

/// Nights between two dates: absolute day difference, never less than 1.
/// Checkout before checkin is not rejected.
pub fn calculate_nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX).max(1)
}

/// Price summary for the detail view. Missing dates quote zero nights.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StayQuote {
    pub nightly_price: f64,
    pub nights: u32,
    pub total_price: f64,
}

pub fn quote(
    hotel: &Hotel,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> StayQuote {
    let nights = match (check_in, check_out) {
        (Some(start), Some(end)) => calculate_nights(start, end),
        _ => 0,
    };
    StayQuote {
        nightly_price: hotel.price,
        nights,
        total_price: hotel.price * f64::from(nights),
    }
}

/// Display-only confirmation number, not unique
pub fn booking_reference() -> String {
    let n = Uuid::new_v4().as_u128() % 1_000_000;
    format!("BK-{}", n)
}

/// Confirm a stay. Both dates must be chosen; guests are held to 1-6.
pub fn confirm_booking(
    hotel: &Hotel,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guests: u8,
) -> Result<Booking> {
    let (check_in, check_out) = match (check_in, check_out) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(StayError::MissingStayDates),
    };
    let nights = calculate_nights(check_in, check_out);
    Ok(Booking {
        hotel: hotel.clone(),
        check_in,
        check_out,
        guests: guests.clamp(MIN_GUESTS, MAX_GUESTS),
        nights,
        total_price: hotel.price * f64::from(nights),
        reference: booking_reference(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_hotels;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_stay_counts_one_night() {
        assert_eq!(calculate_nights(date("2025-06-01"), date("2025-06-01")), 1);
    }

    #[test]
    fn three_day_gap_is_three_nights_either_direction() {
        assert_eq!(calculate_nights(date("2025-06-01"), date("2025-06-04")), 3);
        assert_eq!(calculate_nights(date("2025-06-04"), date("2025-06-01")), 3);
        // across a month boundary
        assert_eq!(calculate_nights(date("2025-01-30"), date("2025-02-02")), 3);
    }

    #[test]
    fn total_is_price_times_nights() {
        let hotel = &sample_hotels()[0];
        let booking =
            confirm_booking(hotel, Some(date("2025-06-01")), Some(date("2025-06-04")), 2).unwrap();
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.total_price, 597.0);
        assert_eq!(booking.guests, 2);
        assert!(booking.reference.starts_with("BK-"));
    }

    #[test]
    fn booking_without_both_dates_is_rejected() {
        let hotel = &sample_hotels()[1];
        let err = confirm_booking(hotel, Some(date("2025-06-01")), None, 2).unwrap_err();
        assert!(matches!(err, StayError::MissingStayDates));
        assert_eq!(err.to_string(), "Please select check-in and check-out dates");
    }

    #[test]
    fn guests_outside_one_to_six_are_clamped() {
        let hotel = &sample_hotels()[0];
        let day = Some(date("2025-06-01"));
        assert_eq!(confirm_booking(hotel, day, day, 0).unwrap().guests, 1);
        assert_eq!(confirm_booking(hotel, day, day, 9).unwrap().guests, 6);
    }

    #[test]
    fn quote_without_dates_is_zero() {
        let hotel = &sample_hotels()[2];
        let q = quote(hotel, None, Some(date("2025-06-01")));
        assert_eq!(q.nights, 0);
        assert_eq!(q.total_price, 0.0);

        let q = quote(hotel, Some(date("2025-06-01")), Some(date("2025-06-03")));
        assert_eq!(q.total_price, 358.0);
    }

    #[test]
    fn reference_number_stays_below_a_million() {
        for _ in 0..50 {
            let reference = booking_reference();
            let n: u32 = reference.trim_start_matches("BK-").parse().unwrap();
            assert!(n < 1_000_000);
        }
    }
}
