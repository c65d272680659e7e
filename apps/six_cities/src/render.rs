//! Plain-text views over store state.

use std::fmt::Write as _;

use shared::domain::{Offer, Review, User};
use six_cities_core::{
    selectors::{self, OfferPageView},
    AppState, SortOption,
};

const STARS: usize = 5;

fn stars(rating: f64) -> String {
    let filled = (rating.round().clamp(0.0, STARS as f64)) as usize;
    format!("{}{}", "*".repeat(filled), ".".repeat(STARS - filled))
}

pub fn offer_card(offer: &Offer) -> String {
    let mut line = format!(
        "[{}] {} - {} - EUR {}/night {}",
        offer.id,
        offer.title,
        offer.offer_type.label(),
        offer.price,
        stars(offer.rating)
    );
    if offer.is_premium {
        line.push_str(" premium");
    }
    if offer.is_favorite {
        line.push_str(" (bookmarked)");
    }
    line
}

pub fn offer_list(state: &AppState, sort: SortOption) -> String {
    let offers = selectors::sorted_offers(state, sort);
    let city = &selectors::current_city(state).name;
    if offers.is_empty() {
        return format!("No places to stay available in {city}");
    }

    let mut out = format!(
        "{} places to stay in {city} (sorted by {})\n",
        offers.len(),
        sort.label()
    );
    for offer in offers {
        let _ = writeln!(out, "  {}", offer_card(offer));
    }
    out
}

pub fn review_line(review: &Review) -> String {
    format!(
        "{} {} ({}): {}",
        stars(f64::from(review.rating)),
        review.author.name,
        review.date.format("%B %Y"),
        review.comment
    )
}

pub fn offer_page(state: &AppState) -> String {
    let (offer, nearby, reviews, review_count) = match selectors::offer_page(state) {
        OfferPageView::Loading => return "Loading...".to_string(),
        OfferPageView::NotFound => return "404. Page not found".to_string(),
        OfferPageView::Ready {
            offer,
            nearby,
            reviews,
            review_count,
        } => (offer, nearby, reviews, review_count),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", offer.title, stars(offer.rating));
    let _ = writeln!(
        out,
        "{} | {} bedrooms | max {} adults | EUR {}/night",
        offer.offer_type.label(),
        offer.bedrooms,
        offer.max_adults,
        offer.price
    );
    if !offer.goods.is_empty() {
        let _ = writeln!(out, "What's inside: {}", offer.goods.join(", "));
    }
    let host = if offer.host.is_pro {
        format!("{} (Pro)", offer.host.name)
    } else {
        offer.host.name.clone()
    };
    let _ = writeln!(out, "Host: {host}");
    let _ = writeln!(out, "{}", offer.description);

    let _ = writeln!(out, "\nReviews: {review_count}");
    for review in reviews {
        let _ = writeln!(out, "  {}", review_line(review));
    }

    if !nearby.is_empty() {
        let _ = writeln!(out, "\nOther places in the neighbourhood");
        for offer in nearby {
            let _ = writeln!(out, "  {}", offer_card(offer));
        }
    }
    out
}

pub fn favorites(state: &AppState) -> String {
    let grouped = selectors::favorites_by_city(state);
    if grouped.is_empty() {
        return "Nothing yet saved. Save properties to narrow down search or plan your future trips."
            .to_string();
    }

    let mut out = String::from("Saved listing\n");
    for (city, offers) in grouped {
        let _ = writeln!(out, "{city}");
        for offer in offers {
            let _ = writeln!(out, "  {}", offer_card(offer));
        }
    }
    out
}

pub fn user(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Signed in as {}", user.email),
        None => "Not signed in".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
