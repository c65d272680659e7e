use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{
    domain::{
        default_city, find_city, Offer, OfferExtended, OfferId, OfferType, Profile, Review,
        ReviewId, User,
    },
    error::ApiException,
    protocol::{LoginRequest, PostReviewRequest},
};
use tokio::sync::oneshot;

use crate::{
    api::SixCitiesApi,
    error::{ClientError, Result},
};

pub(crate) fn sample_offer(id: &str, city: &str, price: u32, rating: f64) -> Offer {
    let city = find_city(city).unwrap_or_else(default_city);
    Offer {
        id: OfferId::new(id),
        title: format!("Offer {id}"),
        offer_type: OfferType::Apartment,
        price,
        location: city.location,
        city,
        is_favorite: false,
        is_premium: false,
        rating,
        preview_image: format!("img/{id}.jpg"),
    }
}

pub(crate) fn sample_offer_extended(id: &str) -> OfferExtended {
    let city = default_city();
    OfferExtended {
        id: OfferId::new(id),
        title: format!("Offer {id}"),
        offer_type: OfferType::Room,
        price: 180,
        location: city.location,
        city,
        is_favorite: false,
        is_premium: true,
        rating: 4.8,
        description: "A quiet cozy and picturesque place that hides behind a river.".into(),
        bedrooms: 2,
        goods: vec!["Heating".into(), "Kitchen".into(), "Wi-Fi".into()],
        host: host(),
        images: vec![format!("img/{id}-1.jpg"), format!("img/{id}-2.jpg")],
        max_adults: 3,
    }
}

pub(crate) fn host() -> Profile {
    Profile {
        name: "Angelina".into(),
        avatar_url: "img/avatar-angelina.jpg".into(),
        is_pro: true,
    }
}

pub(crate) fn sample_review(id: &str, offer_id: &str, day: u32) -> Review {
    Review {
        id: ReviewId::new(id),
        offer_id: OfferId::new(offer_id),
        comment: format!("Review {id}: the house is very good, very happy, hygienic and simple."),
        rating: 4,
        date: Utc
            .with_ymd_and_hms(2024, 3, day, 12, 0, 0)
            .single()
            .expect("valid date"),
        author: Profile {
            name: "Max".into(),
            avatar_url: "img/avatar-max.jpg".into(),
            is_pro: false,
        },
    }
}

pub(crate) fn sample_user() -> User {
    User {
        email: "Oliver.conner@gmail.com".into(),
        name: "Oliver.conner".into(),
        avatar_url: "img/avatar-oliver.jpg".into(),
        is_pro: false,
    }
}

/// A comment exactly `len` characters long.
pub(crate) fn comment_of_len(len: usize) -> String {
    "a".repeat(len)
}

/// Lets a test hold a backend call open: `started` fires when the call
/// arrives, and the call returns once `release` is sent or dropped.
pub(crate) struct Gate {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

/// In-memory backend. Operations named in `failing` return a 500.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub offers: Vec<Offer>,
    pub details: HashMap<OfferId, OfferExtended>,
    pub nearby: HashMap<OfferId, Vec<Offer>>,
    pub reviews: HashMap<OfferId, Vec<Review>>,
    pub favorites: Vec<Offer>,
    pub user: Option<User>,
    pub failing: HashSet<&'static str>,
    pub gates: Mutex<HashMap<&'static str, (oneshot::Sender<()>, oneshot::Receiver<()>)>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub(crate) fn failing(ops: &[&'static str]) -> Self {
        Self {
            failing: ops.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Holds the next call of `op` until the returned gate is released.
    pub(crate) fn gate(&self, op: &'static str) -> Gate {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates
            .lock()
            .expect("gates lock")
            .insert(op, (started_tx, release_rx));
        Gate {
            started: started_rx,
            release: release_tx,
        }
    }

    pub(crate) fn calls(&self, op: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .filter(|call| **call == op)
            .count()
    }

    async fn enter(&self, op: &'static str) -> Result<()> {
        self.calls.lock().expect("calls lock").push(op);
        let gate = self.gates.lock().expect("gates lock").remove(op);
        if let Some((started, release)) = gate {
            let _ = started.send(());
            let _ = release.await;
        }
        if self.failing.contains(op) {
            return Err(ApiException::from_response(500, None).into());
        }
        Ok(())
    }
}

fn not_found() -> ClientError {
    ApiException::from_response(404, None).into()
}

#[async_trait]
impl SixCitiesApi for FakeApi {
    async fn fetch_offers(&self) -> Result<Vec<Offer>> {
        self.enter("fetch_offers").await?;
        Ok(self.offers.clone())
    }

    async fn fetch_offer_by_id(&self, offer_id: &OfferId) -> Result<OfferExtended> {
        self.enter("fetch_offer_by_id").await?;
        self.details.get(offer_id).cloned().ok_or_else(not_found)
    }

    async fn fetch_nearby(&self, offer_id: &OfferId) -> Result<Vec<Offer>> {
        self.enter("fetch_nearby").await?;
        Ok(self.nearby.get(offer_id).cloned().unwrap_or_default())
    }

    async fn fetch_reviews(&self, offer_id: &OfferId) -> Result<Vec<Review>> {
        self.enter("fetch_reviews").await?;
        Ok(self.reviews.get(offer_id).cloned().unwrap_or_default())
    }

    async fn post_review(&self, offer_id: &OfferId, review: &PostReviewRequest) -> Result<Review> {
        self.enter("post_review").await?;
        Ok(Review {
            id: ReviewId::new(format!("posted-{}", self.calls("post_review"))),
            offer_id: offer_id.clone(),
            comment: review.comment.clone(),
            rating: review.rating,
            date: Utc
                .with_ymd_and_hms(2024, 4, 1, 9, 30, 0)
                .single()
                .expect("valid date"),
            author: Profile {
                name: "Oliver.conner".into(),
                avatar_url: "img/avatar-oliver.jpg".into(),
                is_pro: false,
            },
        })
    }

    async fn check_auth(&self) -> Result<User> {
        self.enter("check_auth").await?;
        self.user
            .clone()
            .ok_or_else(|| ApiException::from_response(401, None).into())
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<User> {
        self.enter("login").await?;
        Ok(User {
            email: credentials.email.clone(),
            ..sample_user()
        })
    }

    async fn logout(&self) -> Result<()> {
        self.enter("logout").await
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>> {
        self.enter("fetch_favorites").await?;
        Ok(self.favorites.clone())
    }

    async fn set_favorite(&self, offer_id: &OfferId, is_favorite: bool) -> Result<Offer> {
        self.enter("set_favorite").await?;
        let mut offer = self
            .offers
            .iter()
            .find(|offer| &offer.id == offer_id)
            .cloned()
            .ok_or_else(not_found)?;
        offer.is_favorite = is_favorite;
        Ok(offer)
    }
}
