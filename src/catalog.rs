//! Hotel catalog: the four sample listings and the search filter over them.

use crate::models::{Hotel, SearchCriteria};

#[allow(clippy::too_many_arguments)]
fn hotel(
    id: u32,
    name: &str,
    location: &str,
    price: f64,
    rating: f32,
    image: &str,
    description: &str,
    amenities: &[&str],
) -> Hotel {
    Hotel {
        id,
        name: name.to_string(),
        location: location.to_string(),
        price,
        rating,
        image: image.to_string(),
        description: description.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

/// The fixed sample catalog, in display order
pub fn sample_hotels() -> Vec<Hotel> {
    vec![
        hotel(
            1,
            "Grand Horizon Hotel",
            "Miami, FL",
            199.0,
            4.8,
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "Luxury beachfront hotel with stunning ocean views and world-class amenities.",
            &["Pool", "Spa", "Restaurant", "Gym", "Beach Access"],
        ),
        hotel(
            2,
            "Urban Loft Suites",
            "New York, NY",
            249.0,
            4.6,
            "https://images.unsplash.com/photo-1551632436-cbf8dd35adfa?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "Modern suites in the heart of Manhattan with stylish decor and city views.",
            &["Room Service", "Bar", "Workspace", "Air Conditioning", "City Views"],
        ),
        hotel(
            3,
            "Mountain View Lodge",
            "Denver, CO",
            179.0,
            4.7,
            "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "Cozy mountain retreat with rustic charm and breathtaking natural surroundings.",
            &["Fireplace", "Hot Tub", "Hiking Trails", "Restaurant", "Pet Friendly"],
        ),
        hotel(
            4,
            "Seaside Resort & Spa",
            "San Diego, CA",
            289.0,
            4.9,
            "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80",
            "Premium oceanfront resort with luxurious spa treatments and fine dining.",
            &["Beach Access", "Spa", "Multiple Pools", "Fine Dining", "Water Sports"],
        ),
    ]
}

/// Read-only view over the listings travellers can search
#[derive(Debug, Clone)]
pub struct Catalog {
    hotels: Vec<Hotel>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(sample_hotels())
    }
}

impl Catalog {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    pub fn all(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn get(&self, id: u32) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Hotel> {
        filter_hotels(&self.hotels, &criteria.location, criteria.price_range)
    }
}

/// Hotels whose location contains `location` (case-insensitive, empty matches all)
/// and whose nightly price is at most `max_price`. Input order is kept.
pub fn filter_hotels(hotels: &[Hotel], location: &str, max_price: f64) -> Vec<Hotel> {
    let needle = location.to_lowercase();
    hotels
        .iter()
        .filter(|h| needle.is_empty() || h.location.to_lowercase().contains(&needle))
        .filter(|h| h.price <= max_price)
        .cloned()
        .collect()
}

/// Notice shown after a search
pub fn search_notice(found: usize) -> String {
    if found == 0 {
        "No hotels match your search criteria. Try adjusting your filters.".to_string()
    } else {
        format!("Found {} hotels matching your criteria!", found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let hotels = sample_hotels();
        let results = filter_hotels(&hotels, "new YORK", 500.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Urban Loft Suites");

        // ", CA" only matches San Diego
        let results = filter_hotels(&hotels, ", ca", 500.0);
        assert!(results.iter().all(|h| h.location.to_lowercase().contains(", ca")));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_location_matches_everything_under_price() {
        let hotels = sample_hotels();
        assert_eq!(filter_hotels(&hotels, "", 500.0).len(), 4);

        let cheap = filter_hotels(&hotels, "", 199.0);
        let ids: Vec<u32> = cheap.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cheap.iter().all(|h| h.price <= 199.0));
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let catalog = Catalog::default();
        let criteria = SearchCriteria {
            location: "Paris".to_string(),
            ..SearchCriteria::default()
        };
        assert!(catalog.search(&criteria).is_empty());
        assert_eq!(
            search_notice(0),
            "No hotels match your search criteria. Try adjusting your filters."
        );
        assert_eq!(search_notice(3), "Found 3 hotels matching your criteria!");
    }

    #[test]
    fn price_cap_excludes_pricier_hotels() {
        let catalog = Catalog::default();
        let results = catalog.search(&SearchCriteria::default());
        assert_eq!(results.len(), 4);
        let capped = SearchCriteria {
            price_range: 250.0,
            ..SearchCriteria::default()
        };
        assert_eq!(catalog.search(&capped).len(), 3);
        assert!(catalog.get(4).is_some());
        assert!(catalog.get(9).is_none());
    }
}
