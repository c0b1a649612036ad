//! Owner-side property list.

use tracing::{debug, warn};

use crate::catalog::sample_hotels;
use crate::error::{Result, StayError};
use crate::models::{Hotel, NewProperty, DEFAULT_HOTEL_IMAGE};

/// Properties an owner manages. Ids are `len + 1`, so they can collide.
#[derive(Debug, Clone)]
pub struct OwnedProperties {
    hotels: Vec<Hotel>,
}

impl Default for OwnedProperties {
    /// New owners start with the first two sample listings
    fn default() -> Self {
        Self::new(sample_hotels().into_iter().take(2).collect())
    }
}

impl OwnedProperties {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    pub fn list(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    /// Validate the draft and append it. Leaves the list untouched on error.
    pub fn add(&mut self, draft: &NewProperty) -> Result<Hotel> {
        let price = validate_draft(draft)?;
        let hotel = Hotel {
            id: self.hotels.len() as u32 + 1,
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            price,
            rating: 0.0,
            image: if draft.image.trim().is_empty() {
                DEFAULT_HOTEL_IMAGE.to_string()
            } else {
                draft.image.trim().to_string()
            },
            description: draft.description.clone(),
            amenities: draft.amenities.clone(),
        };
        debug!(id = hotel.id, name = %hotel.name, "property added");
        self.hotels.push(hotel.clone());
        Ok(hotel)
    }
}

fn validate_draft(draft: &NewProperty) -> Result<f64> {
    if draft.name.trim().is_empty()
        || draft.location.trim().is_empty()
        || draft.price.trim().is_empty()
    {
        return Err(StayError::MissingPropertyFields);
    }
    match draft.price.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => {
            warn!(price = %draft.price, "unparseable property price");
            Err(StayError::MissingPropertyFields)
        }
    }
}

/// Append a trimmed amenity to the draft; blank input is ignored.
pub fn add_amenity(draft: &mut NewProperty, amenity: &str) -> bool {
    let amenity = amenity.trim();
    if amenity.is_empty() {
        return false;
    }
    draft.amenities.push(amenity.to_string());
    true
}
