use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback image for properties listed without one
pub const DEFAULT_HOTEL_IMAGE: &str =
    "https://images.unsplash.com/photo-1551632436-cbf8dd35adfa?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub price: f64, // per night, USD
    pub rating: f32,
    pub image: String,
    pub description: String,
    pub amenities: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    HotelOwner,
    Traveller,
}

impl Role {
    /// Wire name, as stored in sessions and tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HotelOwner => "hotel_owner",
            Role::Traveller => "traveller",
        }
    }

    /// Human form used in messages ("hotel owner")
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotel_owner" | "owner" => Ok(Role::HotelOwner),
            "traveller" | "traveler" => Ok(Role::Traveller),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: u32,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Search form state. Dates stay optional until the traveller books.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SearchCriteria {
    pub location: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u8,
    pub price_range: f64,
}

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 6;
pub const MIN_PRICE_RANGE: f64 = 50.0;
pub const MAX_PRICE_RANGE: f64 = 500.0;

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            location: String::new(),
            check_in: None,
            check_out: None,
            guests: 2,
            price_range: 300.0,
        }
    }
}

impl SearchCriteria {
    /// Pull guests and max price back inside the ranges the search form offers
    pub fn clamped(mut self) -> Self {
        self.guests = self.guests.clamp(MIN_GUESTS, MAX_GUESTS);
        self.price_range = self.price_range.clamp(MIN_PRICE_RANGE, MAX_PRICE_RANGE);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Booking {
    pub hotel: Hotel,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u8,
    pub nights: u32,
    pub total_price: f64,
    pub reference: String, // display-only, e.g. BK-482913
}

/// Owner's add-property form. Price is kept as typed so blank input can be told apart from zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NewProperty {
    pub name: String,
    pub location: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_amenities")]
    pub amenities: Vec<String>,
}

fn default_amenities() -> Vec<String> {
    vec!["WiFi".to_string()]
}

impl Default for NewProperty {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            price: String::new(),
            description: String::new(),
            image: String::new(),
            amenities: default_amenities(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthPayload {
    pub sub: String, // email
    pub uid: u32,
    pub name: String,
    pub role: Role,
    pub exp: usize,
}

impl AuthPayload {
    pub fn user(&self) -> User {
        User {
            id: self.uid,
            email: self.sub.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}
