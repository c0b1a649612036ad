//! Per-session state for the two dashboards.
//!
//! `TravellerFlow` steps Browse -> Detail -> Confirmed; `OwnerDashboard`
//! toggles the add-property form and keeps the owner's list.

use chrono::NaiveDate;
use tracing::info;

use crate::booking::{confirm_booking, quote, StayQuote};
use crate::catalog::{search_notice, Catalog};
use crate::error::{Result, StayError};
use crate::models::{Booking, Hotel, NewProperty, SearchCriteria};
use crate::property::{add_amenity, OwnedProperties};

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Browse,
    Detail(Hotel),
    Confirmed(Booking),
}

#[derive(Debug, Clone)]
pub struct TravellerFlow {
    catalog: Catalog,
    criteria: SearchCriteria,
    results: Vec<Hotel>,
    stage: Stage,
}

impl TravellerFlow {
    /// Starts on Browse with the whole catalog listed
    pub fn new(catalog: Catalog) -> Self {
        let results = catalog.all().to_vec();
        Self {
            catalog,
            criteria: SearchCriteria::default(),
            results,
            stage: Stage::Browse,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut SearchCriteria {
        &mut self.criteria
    }

    pub fn set_dates(&mut self, check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) {
        self.criteria.check_in = check_in;
        self.criteria.check_out = check_out;
    }

    pub fn results(&self) -> &[Hotel] {
        &self.results
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Re-run the filter with the current criteria; returns the notice to show.
    pub fn search(&mut self) -> String {
        self.criteria = self.criteria.clone().clamped();
        self.results = self.catalog.search(&self.criteria);
        info!(
            location = %self.criteria.location,
            max_price = self.criteria.price_range,
            found = self.results.len(),
            "hotel search"
        );
        search_notice(self.results.len())
    }

    pub fn select_hotel(&mut self, id: u32) -> Result<&Hotel> {
        let hotel = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(StayError::HotelNotFound(id))?;
        self.stage = Stage::Detail(hotel);
        self.selected().ok_or(StayError::NoHotelSelected)
    }

    pub fn selected(&self) -> Option<&Hotel> {
        match &self.stage {
            Stage::Detail(hotel) => Some(hotel),
            Stage::Confirmed(booking) => Some(&booking.hotel),
            Stage::Browse => None,
        }
    }

    /// Price summary for the selected hotel with the chosen dates
    pub fn quote(&self) -> Option<StayQuote> {
        self.selected()
            .map(|hotel| quote(hotel, self.criteria.check_in, self.criteria.check_out))
    }

    /// Detail -> Confirmed. Missing dates keep the flow on Detail.
    pub fn book_now(&mut self) -> Result<&Booking> {
        let hotel = match &self.stage {
            Stage::Detail(hotel) => hotel,
            _ => return Err(StayError::NoHotelSelected),
        };
        let booking = confirm_booking(
            hotel,
            self.criteria.check_in,
            self.criteria.check_out,
            self.criteria.guests,
        )?;
        info!(
            hotel_id = booking.hotel.id,
            nights = booking.nights,
            total = booking.total_price,
            reference = %booking.reference,
            "booking confirmed"
        );
        self.stage = Stage::Confirmed(booking);
        self.booking().ok_or(StayError::NoHotelSelected)
    }

    pub fn booking(&self) -> Option<&Booking> {
        match &self.stage {
            Stage::Confirmed(booking) => Some(booking),
            _ => None,
        }
    }

    /// Detail -> Browse
    pub fn back(&mut self) {
        if matches!(self.stage, Stage::Detail(_)) {
            self.stage = Stage::Browse;
        }
    }

    /// Drop any selection or booking and return to the list
    pub fn new_search(&mut self) {
        self.stage = Stage::Browse;
    }
}

#[derive(Debug, Clone, Default)]
pub struct OwnerDashboard {
    owned: OwnedProperties,
    form_open: bool,
    draft: NewProperty,
}

impl OwnerDashboard {
    pub fn new(owned: OwnedProperties) -> Self {
        Self {
            owned,
            form_open: false,
            draft: NewProperty::default(),
        }
    }

    pub fn properties(&self) -> &[Hotel] {
        self.owned.list()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    /// Hide the form; the draft is kept for the next time it opens
    pub fn cancel_form(&mut self) {
        self.form_open = false;
    }

    pub fn draft(&self) -> &NewProperty {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewProperty {
        &mut self.draft
    }

    pub fn add_amenity(&mut self, amenity: &str) -> bool {
        add_amenity(&mut self.draft, amenity)
    }

    /// Submit the draft. On success the form closes and the draft resets.
    pub fn submit(&mut self) -> Result<Hotel> {
        let hotel = self.owned.add(&self.draft)?;
        self.form_open = false;
        self.draft = NewProperty::default();
        Ok(hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn browse_detail_confirm() {
        let mut flow = TravellerFlow::new(Catalog::default());
        assert_eq!(flow.results().len(), 4);
        assert_eq!(flow.stage(), &Stage::Browse);

        flow.criteria_mut().location = "miami".to_string();
        let notice = flow.search();
        assert_eq!(notice, "Found 1 hotels matching your criteria!");

        flow.select_hotel(1).unwrap();
        assert_eq!(flow.quote().unwrap().nights, 0);

        flow.set_dates(Some(date("2025-07-10")), Some(date("2025-07-12")));
        let booking = flow.book_now().unwrap();
        assert_eq!(booking.total_price, 398.0);
        assert!(matches!(flow.stage(), Stage::Confirmed(_)));

        flow.new_search();
        assert_eq!(flow.stage(), &Stage::Browse);
        assert!(flow.selected().is_none());
    }

    #[test]
    fn booking_without_dates_stays_on_detail() {
        let mut flow = TravellerFlow::new(Catalog::default());
        flow.select_hotel(2).unwrap();
        let err = flow.book_now().unwrap_err();
        assert!(matches!(err, StayError::MissingStayDates));
        assert!(matches!(flow.stage(), Stage::Detail(h) if h.id == 2));

        flow.back();
        assert_eq!(flow.stage(), &Stage::Browse);
        assert!(matches!(flow.book_now(), Err(StayError::NoHotelSelected)));
    }

    #[test]
    fn booking_without_a_search_still_holds_guests_in_range() {
        let mut flow = TravellerFlow::new(Catalog::default());
        flow.criteria_mut().guests = 0;
        flow.select_hotel(1).unwrap();
        flow.set_dates(Some(date("2025-07-10")), Some(date("2025-07-10")));
        assert_eq!(flow.book_now().unwrap().guests, 1);

        flow.new_search();
        flow.criteria_mut().guests = 12;
        flow.select_hotel(3).unwrap();
        assert_eq!(flow.book_now().unwrap().guests, 6);
    }

    #[test]
    fn unknown_hotel_cannot_be_selected() {
        let mut flow = TravellerFlow::new(Catalog::default());
        assert!(matches!(flow.select_hotel(42), Err(StayError::HotelNotFound(42))));
        assert_eq!(flow.stage(), &Stage::Browse);
    }

    #[test]
    fn search_with_no_matches_keeps_an_empty_list() {
        let mut flow = TravellerFlow::new(Catalog::default());
        flow.criteria_mut().location = "Tokyo".to_string();
        let notice = flow.search();
        assert!(flow.results().is_empty());
        assert!(notice.starts_with("No hotels match"));
    }

    #[test]
    fn owner_submit_resets_draft_and_closes_form() {
        let mut dash = OwnerDashboard::default();
        dash.open_form();
        dash.draft_mut().name = "Cabin".to_string();
        dash.draft_mut().location = "Aspen, CO".to_string();
        dash.draft_mut().price = "320".to_string();
        dash.add_amenity("Fireplace");

        let hotel = dash.submit().unwrap();
        assert_eq!(hotel.id, 3);
        assert_eq!(hotel.amenities, vec!["WiFi".to_string(), "Fireplace".to_string()]);
        assert!(!dash.is_form_open());
        assert_eq!(dash.draft(), &NewProperty::default());
        assert_eq!(dash.properties().len(), 3);
    }

    #[test]
    fn owner_submit_failure_keeps_form_and_list() {
        let mut dash = OwnerDashboard::default();
        dash.open_form();
        dash.draft_mut().name = "Cabin".to_string();
        assert!(matches!(dash.submit(), Err(StayError::MissingPropertyFields)));
        assert!(dash.is_form_open());
        assert_eq!(dash.draft().name, "Cabin");
        assert_eq!(dash.properties().len(), 2);
    }
}
