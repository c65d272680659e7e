use shared::domain::{
    default_city, AuthorizationStatus, City, Offer, OfferExtended, Review, User,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Always one of the known cities.
    pub city: City,
    pub offers: Vec<Offer>,
    pub is_offers_data_loading: bool,
    pub authorization_status: AuthorizationStatus,
    /// `Some` only while authorized.
    pub user_data: Option<User>,
    pub offer_data: Option<OfferExtended>,
    pub nearby_data: Vec<Offer>,
    pub review_data: Vec<Review>,
    pub is_error_offer: bool,
    pub is_review_pending: bool,
    pub favorites: Vec<Offer>,
    pub is_favorites_loading: bool,
}

impl AppState {
    pub fn with_city(city: City) -> Self {
        Self {
            city,
            offers: Vec::new(),
            is_offers_data_loading: false,
            authorization_status: AuthorizationStatus::Unknown,
            user_data: None,
            offer_data: None,
            nearby_data: Vec::new(),
            review_data: Vec::new(),
            is_error_offer: false,
            is_review_pending: false,
            favorites: Vec::new(),
            is_favorites_loading: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_city(default_city())
    }
}
