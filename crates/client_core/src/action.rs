//! State-transition requests. Variants only describe what happened; the
//! reducer decides what it means for the state.

use shared::domain::{AuthorizationStatus, Offer, OfferExtended, Review, User};

use crate::route::AppRoute;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectLocation(String),
    LoadOffers(Vec<Offer>),
    SetOffersDataLoadingStatus(bool),
    RequireAuthorization(AuthorizationStatus),
    SetUserData(Option<User>),
    SetOfferById(Option<OfferExtended>),
    SetNearby(Vec<Offer>),
    SetReviews(Vec<Review>),
    PushReview(Review),
    SetIsErrorOffer(bool),
    RedirectToRoute(AppRoute),
    SetReviewPending(bool),
    SetFavorites(Vec<Offer>),
    SetFavoritesLoadingStatus(bool),
    UpdateFavorite(Offer),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectLocation(_) => "select_location",
            Self::LoadOffers(_) => "load_offers",
            Self::SetOffersDataLoadingStatus(_) => "set_offers_data_loading_status",
            Self::RequireAuthorization(_) => "require_authorization",
            Self::SetUserData(_) => "set_user_data",
            Self::SetOfferById(_) => "set_offer_by_id",
            Self::SetNearby(_) => "set_nearby",
            Self::SetReviews(_) => "set_reviews",
            Self::PushReview(_) => "push_review",
            Self::SetIsErrorOffer(_) => "set_is_error_offer",
            Self::RedirectToRoute(_) => "redirect_to_route",
            Self::SetReviewPending(_) => "set_review_pending",
            Self::SetFavorites(_) => "set_favorites",
            Self::SetFavoritesLoadingStatus(_) => "set_favorites_loading_status",
            Self::UpdateFavorite(_) => "update_favorite",
        }
    }
}
