//! Read-only projections of [`AppState`] for views.

use std::collections::BTreeMap;

use shared::domain::{AuthorizationStatus, City, Offer, OfferExtended, Review, User};

use crate::state::AppState;

pub const NEARBY_OFFERS_LIMIT: usize = 3;
pub const MAX_REVIEWS_SHOWN: usize = 10;

pub fn is_review_pending(state: &AppState) -> bool {
    state.is_review_pending
}

pub fn is_offers_data_loading(state: &AppState) -> bool {
    state.is_offers_data_loading
}

pub fn is_error_offer(state: &AppState) -> bool {
    state.is_error_offer
}

pub fn is_favorites_loading(state: &AppState) -> bool {
    state.is_favorites_loading
}

pub fn authorization_status(state: &AppState) -> AuthorizationStatus {
    state.authorization_status
}

pub fn user_data(state: &AppState) -> Option<&User> {
    state.user_data.as_ref()
}

pub fn current_city(state: &AppState) -> &City {
    &state.city
}

pub fn offers_in_city(state: &AppState) -> Vec<&Offer> {
    state
        .offers
        .iter()
        .filter(|offer| offer.city.name == state.city.name)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
    TopRated,
}

impl SortOption {
    pub fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::PriceLowToHigh => "Price: low to high",
            Self::PriceHighToLow => "Price: high to low",
            Self::TopRated => "Top rated first",
        }
    }
}

/// Offers of the current city in the requested order. `Popular` keeps the
/// order the backend returned.
pub fn sorted_offers(state: &AppState, sort: SortOption) -> Vec<&Offer> {
    let mut offers = offers_in_city(state);
    match sort {
        SortOption::Popular => {}
        SortOption::PriceLowToHigh => offers.sort_by_key(|offer| offer.price),
        SortOption::PriceHighToLow => offers.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::TopRated => offers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    offers
}

pub fn nearby_for_page(state: &AppState) -> &[Offer] {
    let len = state.nearby_data.len().min(NEARBY_OFFERS_LIMIT);
    &state.nearby_data[..len]
}

/// Newest first, capped at [`MAX_REVIEWS_SHOWN`].
pub fn reviews_for_display(state: &AppState) -> Vec<&Review> {
    let mut reviews: Vec<&Review> = state.review_data.iter().collect();
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
    reviews.truncate(MAX_REVIEWS_SHOWN);
    reviews
}

pub fn review_count(state: &AppState) -> usize {
    state.review_data.len()
}

pub fn favorites_by_city(state: &AppState) -> BTreeMap<&str, Vec<&Offer>> {
    let mut grouped: BTreeMap<&str, Vec<&Offer>> = BTreeMap::new();
    for offer in &state.favorites {
        grouped.entry(offer.city.name.as_str()).or_default().push(offer);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferPageView<'a> {
    Loading,
    NotFound,
    Ready {
        offer: &'a OfferExtended,
        nearby: &'a [Offer],
        reviews: Vec<&'a Review>,
        review_count: usize,
    },
}

pub fn offer_page(state: &AppState) -> OfferPageView<'_> {
    if state.is_error_offer {
        return OfferPageView::NotFound;
    }

    match &state.offer_data {
        Some(offer) => OfferPageView::Ready {
            offer,
            nearby: nearby_for_page(state),
            reviews: reviews_for_display(state),
            review_count: review_count(state),
        },
        None => OfferPageView::Loading,
    }
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
