use super::*;
use crate::test_support::{sample_offer, sample_offer_extended, sample_review};

fn state_with_offers() -> AppState {
    let mut state = AppState::default();
    state.offers = vec![
        sample_offer("p1", "Paris", 200, 3.5),
        sample_offer("a1", "Amsterdam", 80, 4.9),
        sample_offer("p2", "Paris", 90, 4.7),
        sample_offer("p3", "Paris", 150, 4.0),
    ];
    state
}

fn ids<'a>(offers: &[&'a Offer]) -> Vec<&'a str> {
    offers.iter().map(|offer| offer.id.as_str()).collect()
}

#[test]
fn flags_project_state() {
    let mut state = AppState::default();
    assert!(!is_review_pending(&state));
    assert!(!is_offers_data_loading(&state));
    assert!(!is_error_offer(&state));
    assert_eq!(authorization_status(&state), AuthorizationStatus::Unknown);
    assert!(user_data(&state).is_none());

    state.is_review_pending = true;
    state.is_offers_data_loading = true;
    state.is_error_offer = true;
    state.is_favorites_loading = true;
    assert!(is_review_pending(&state));
    assert!(is_offers_data_loading(&state));
    assert!(is_error_offer(&state));
    assert!(is_favorites_loading(&state));
}

#[test]
fn offers_are_filtered_by_current_city() {
    let state = state_with_offers();
    assert_eq!(ids(&offers_in_city(&state)), ["p1", "p2", "p3"]);
}

#[test]
fn sort_options_order_city_offers() {
    let state = state_with_offers();
    assert_eq!(ids(&sorted_offers(&state, SortOption::Popular)), ["p1", "p2", "p3"]);
    assert_eq!(
        ids(&sorted_offers(&state, SortOption::PriceLowToHigh)),
        ["p2", "p3", "p1"]
    );
    assert_eq!(
        ids(&sorted_offers(&state, SortOption::PriceHighToLow)),
        ["p1", "p3", "p2"]
    );
    assert_eq!(ids(&sorted_offers(&state, SortOption::TopRated)), ["p2", "p3", "p1"]);
}

#[test]
fn nearby_is_capped() {
    let mut state = AppState::default();
    state.nearby_data = (0..5)
        .map(|i| sample_offer(&format!("n{i}"), "Paris", 100, 4.0))
        .collect();
    assert_eq!(nearby_for_page(&state).len(), NEARBY_OFFERS_LIMIT);

    state.nearby_data.truncate(1);
    assert_eq!(nearby_for_page(&state).len(), 1);
}

#[test]
fn reviews_are_newest_first_and_capped() {
    let mut state = AppState::default();
    state.review_data = (1..=12)
        .map(|day| sample_review(&format!("r{day}"), "1", day))
        .collect();

    let shown = reviews_for_display(&state);
    assert_eq!(shown.len(), MAX_REVIEWS_SHOWN);
    assert_eq!(shown[0].id.as_str(), "r12");
    assert_eq!(shown[9].id.as_str(), "r3");
    assert_eq!(review_count(&state), 12);
    // The stored order is untouched.
    assert_eq!(state.review_data[0].id.as_str(), "r1");
}

#[test]
fn favorites_grouped_by_city_name() {
    let mut state = AppState::default();
    state.favorites = vec![
        sample_offer("p1", "Paris", 100, 4.0),
        sample_offer("a1", "Amsterdam", 100, 4.0),
        sample_offer("p2", "Paris", 100, 4.0),
    ];

    let grouped = favorites_by_city(&state);
    let cities: Vec<&str> = grouped.keys().copied().collect();
    assert_eq!(cities, ["Amsterdam", "Paris"]);
    assert_eq!(ids(&grouped["Paris"]), ["p1", "p2"]);
}

#[test]
fn offer_page_view_follows_detail_and_error_flag() {
    let mut state = AppState::default();
    assert_eq!(offer_page(&state), OfferPageView::Loading);

    state.offer_data = Some(sample_offer_extended("1"));
    state.review_data = vec![sample_review("r1", "1", 1)];
    match offer_page(&state) {
        OfferPageView::Ready {
            offer,
            review_count,
            ..
        } => {
            assert_eq!(offer.id.as_str(), "1");
            assert_eq!(review_count, 1);
        }
        other => panic!("expected ready page, got {other:?}"),
    }

    state.is_error_offer = true;
    state.offer_data = None;
    assert_eq!(offer_page(&state), OfferPageView::NotFound);
}
