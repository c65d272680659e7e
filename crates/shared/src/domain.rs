use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(OfferId);
id_newtype!(ReviewId);

/// City every session starts on.
pub const DEFAULT_CITY: &str = "Paris";

const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub location: Location,
}

struct KnownCity {
    name: &'static str,
    location: Location,
}

impl From<&KnownCity> for City {
    fn from(value: &KnownCity) -> Self {
        Self {
            name: value.name.to_string(),
            location: value.location,
        }
    }
}

// The first entry doubles as the default city.
const KNOWN_CITIES: [KnownCity; 6] = [
    KnownCity {
        name: DEFAULT_CITY,
        location: Location {
            latitude: 48.85661,
            longitude: 2.351499,
            zoom: DEFAULT_ZOOM,
        },
    },
    KnownCity {
        name: "Cologne",
        location: Location {
            latitude: 50.938361,
            longitude: 6.959974,
            zoom: DEFAULT_ZOOM,
        },
    },
    KnownCity {
        name: "Brussels",
        location: Location {
            latitude: 50.846557,
            longitude: 4.351697,
            zoom: DEFAULT_ZOOM,
        },
    },
    KnownCity {
        name: "Amsterdam",
        location: Location {
            latitude: 52.37454,
            longitude: 4.897976,
            zoom: DEFAULT_ZOOM,
        },
    },
    KnownCity {
        name: "Hamburg",
        location: Location {
            latitude: 53.550341,
            longitude: 10.000654,
            zoom: DEFAULT_ZOOM,
        },
    },
    KnownCity {
        name: "Dusseldorf",
        location: Location {
            latitude: 51.225402,
            longitude: 6.776314,
            zoom: DEFAULT_ZOOM,
        },
    },
];

/// All cities the site knows about, in menu order.
pub fn known_cities() -> impl Iterator<Item = City> {
    KNOWN_CITIES.iter().map(City::from)
}

/// Exact, case-sensitive lookup in the known city set.
pub fn find_city(name: &str) -> Option<City> {
    KNOWN_CITIES
        .iter()
        .find(|city| city.name == name)
        .map(City::from)
}

pub fn default_city() -> City {
    City::from(&KNOWN_CITIES[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Apartment,
    Room,
    House,
    Hotel,
    #[serde(other)]
    Other,
}

impl OfferType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Room => "Private room",
            Self::House => "House",
            Self::Hotel => "Hotel",
            Self::Other => "Place",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub price: u32,
    pub city: City,
    pub location: Location,
    pub is_favorite: bool,
    pub is_premium: bool,
    pub rating: f64,
    #[serde(default)]
    pub preview_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferExtended {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub price: u32,
    pub city: City,
    pub location: Location,
    pub is_favorite: bool,
    pub is_premium: bool,
    pub rating: f64,
    pub description: String,
    pub bedrooms: u32,
    #[serde(default)]
    pub goods: Vec<String>,
    pub host: Profile,
    #[serde(default)]
    pub images: Vec<String>,
    pub max_adults: u32,
}

impl OfferExtended {
    /// Listing-card view of a detail record; the first photo stands in for
    /// the preview image.
    pub fn summary(&self) -> Offer {
        Offer {
            id: self.id.clone(),
            title: self.title.clone(),
            offer_type: self.offer_type,
            price: self.price,
            city: self.city.clone(),
            location: self.location,
            is_favorite: self.is_favorite,
            is_premium: self.is_premium,
            rating: self.rating,
            preview_image: self.images.first().cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub offer_id: OfferId,
    pub comment: String,
    pub rating: u8,
    pub date: chrono::DateTime<chrono::Utc>,
    pub author: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Auth,
    NoAuth,
    #[default]
    Unknown,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        self == Self::Auth
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
