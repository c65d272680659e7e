use shared::domain::find_city;

use crate::{action::Action, state::AppState};

/// Computes the state that follows `state` once `action` is applied.
///
/// Depends on nothing but its arguments and leaves `state` untouched, so the
/// same pair always yields the same result.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SelectLocation(name) => {
            // Unknown names keep the current city.
            if let Some(city) = find_city(&name) {
                next.city = city;
            }
        }
        Action::LoadOffers(offers) => next.offers = offers,
        Action::SetOffersDataLoadingStatus(loading) => next.is_offers_data_loading = loading,
        Action::RequireAuthorization(status) => next.authorization_status = status,
        Action::SetUserData(user) => next.user_data = user,
        Action::SetOfferById(offer) => next.offer_data = offer,
        Action::SetNearby(offers) => next.nearby_data = offers,
        Action::SetReviews(reviews) => next.review_data = reviews,
        Action::PushReview(review) => next.review_data.push(review),
        Action::SetIsErrorOffer(is_error) => next.is_error_offer = is_error,
        Action::RedirectToRoute(_) => {}
        Action::SetReviewPending(pending) => next.is_review_pending = pending,
        Action::SetFavorites(offers) => next.favorites = offers,
        Action::SetFavoritesLoadingStatus(loading) => next.is_favorites_loading = loading,
        Action::UpdateFavorite(offer) => {
            let is_favorite = offer.is_favorite;
            next.offers
                .iter_mut()
                .chain(next.nearby_data.iter_mut())
                .filter(|item| item.id == offer.id)
                .for_each(|item| item.is_favorite = is_favorite);
            if let Some(detail) = next.offer_data.as_mut().filter(|detail| detail.id == offer.id) {
                detail.is_favorite = is_favorite;
            }

            next.favorites.retain(|item| item.id != offer.id);
            if is_favorite {
                next.favorites.push(offer);
            }
        }
    }

    next
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
