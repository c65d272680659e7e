//! Multi-step flows: call the backend, then dispatch what came back.
//!
//! Every operation is awaited independently; nothing here serialises two
//! unrelated calls. Loading and pending flags are raised before the backend
//! call and lowered by a drop guard, so every exit path clears them.
//!
//! Offer-page responses are fenced by a navigation epoch. Every
//! [`Orchestrator::open_offer`] and [`Orchestrator::leave_offer`] starts a new
//! epoch; a response is applied only if no navigation happened since its
//! request was issued and, while an offer page is open, only for that offer.

use std::sync::Arc;

use shared::{
    domain::{AuthorizationStatus, Offer, OfferId, Review, User},
    protocol::{LoginRequest, PostReviewRequest},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    action::Action,
    api::SixCitiesApi,
    error::{ClientError, Result},
    review_form::ReviewDraft,
    route::AppRoute,
    selectors,
    store::Store,
};

/// Raises a boolean flag on creation and lowers it on drop.
struct FlagGuard<'a> {
    store: &'a Store,
    set: fn(bool) -> Action,
}

impl<'a> FlagGuard<'a> {
    fn raise(store: &'a Store, set: fn(bool) -> Action) -> Self {
        store.dispatch(set(true));
        Self { store, set }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch((self.set)(false));
    }
}

/// Which offer page responses may still update.
#[derive(Debug, Default)]
struct Navigation {
    epoch: u64,
    open: Option<OfferId>,
}

impl Navigation {
    fn accepts(&self, epoch: u64, offer_id: &OfferId) -> bool {
        self.epoch == epoch && self.open.as_ref().map_or(true, |open| open == offer_id)
    }

    fn advance(&mut self, open: Option<OfferId>) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.open = open;
        self.epoch
    }
}

pub struct Orchestrator<A: SixCitiesApi> {
    store: Arc<Store>,
    api: Arc<A>,
    fence: Mutex<Navigation>,
}

impl<A: SixCitiesApi> Orchestrator<A> {
    pub fn new(store: Arc<Store>, api: Arc<A>) -> Self {
        Self {
            store,
            api,
            fence: Mutex::new(Navigation::default()),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    async fn epoch(&self) -> u64 {
        self.fence.lock().await.epoch
    }

    /// Dispatches `actions` unless navigation moved on since `epoch` or
    /// another offer page is open. Holding the fence lock while dispatching
    /// keeps navigation from slipping in between the check and the update.
    async fn dispatch_for_offer(
        &self,
        offer_id: &OfferId,
        epoch: u64,
        actions: impl IntoIterator<Item = Action>,
    ) -> bool {
        let navigation = self.fence.lock().await;
        if !navigation.accepts(epoch, offer_id) {
            warn!(
                offer_id = %offer_id,
                epoch,
                current_epoch = navigation.epoch,
                "discarding response for an offer that is no longer open"
            );
            return false;
        }

        for action in actions {
            self.store.dispatch(action);
        }
        true
    }

    pub async fn check_auth(&self) -> AuthorizationStatus {
        match self.api.check_auth().await {
            Ok(user) => {
                info!(email = %user.email, "session is authorized");
                self.store
                    .dispatch(Action::RequireAuthorization(AuthorizationStatus::Auth));
                self.store.dispatch(Action::SetUserData(Some(user)));
                AuthorizationStatus::Auth
            }
            Err(err) => {
                info!(error = %err, "session is not authorized");
                self.store
                    .dispatch(Action::RequireAuthorization(AuthorizationStatus::NoAuth));
                self.store.dispatch(Action::SetUserData(None));
                AuthorizationStatus::NoAuth
            }
        }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<User> {
        match self.api.login(credentials).await {
            Ok(user) => {
                info!(email = %user.email, "signed in");
                self.store
                    .dispatch(Action::RequireAuthorization(AuthorizationStatus::Auth));
                self.store.dispatch(Action::SetUserData(Some(user.clone())));
                self.store.dispatch(Action::RedirectToRoute(AppRoute::Main));
                Ok(user)
            }
            Err(err) => {
                warn!(email = %credentials.email, error = %err, "sign in failed");
                self.store
                    .dispatch(Action::RequireAuthorization(AuthorizationStatus::NoAuth));
                self.store.dispatch(Action::SetUserData(None));
                Err(err)
            }
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.api.logout().await.inspect_err(|err| {
            warn!(error = %err, "sign out failed");
        })?;

        info!("signed out");
        self.store
            .dispatch(Action::RequireAuthorization(AuthorizationStatus::NoAuth));
        self.store.dispatch(Action::SetUserData(None));
        self.store.dispatch(Action::SetFavorites(Vec::new()));
        Ok(())
    }

    /// On failure the previous list stays in place.
    pub async fn load_offers(&self) -> Result<()> {
        let _loading = FlagGuard::raise(&self.store, Action::SetOffersDataLoadingStatus);
        let offers = self.api.fetch_offers().await.inspect_err(|err| {
            warn!(error = %err, "failed to load offers");
        })?;

        info!(count = offers.len(), "offers loaded");
        self.store.dispatch(Action::LoadOffers(offers));
        Ok(())
    }

    pub async fn load_offer_by_id(&self, offer_id: &OfferId) -> Result<()> {
        let epoch = self.epoch().await;
        self.load_offer_detail(offer_id, epoch).await
    }

    async fn load_offer_detail(&self, offer_id: &OfferId, epoch: u64) -> Result<()> {
        match self.api.fetch_offer_by_id(offer_id).await {
            Ok(offer) => {
                self.dispatch_for_offer(
                    offer_id,
                    epoch,
                    [
                        Action::SetIsErrorOffer(false),
                        Action::SetOfferById(Some(offer)),
                    ],
                )
                .await;
                Ok(())
            }
            Err(err) => {
                warn!(offer_id = %offer_id, error = %err, "failed to load offer");
                self.dispatch_for_offer(
                    offer_id,
                    epoch,
                    [Action::SetIsErrorOffer(true), Action::SetOfferById(None)],
                )
                .await;
                Err(err)
            }
        }
    }

    pub async fn load_nearby(&self, offer_id: &OfferId) -> Result<()> {
        let epoch = self.epoch().await;
        self.load_nearby_in(offer_id, epoch).await
    }

    async fn load_nearby_in(&self, offer_id: &OfferId, epoch: u64) -> Result<()> {
        let nearby = self.api.fetch_nearby(offer_id).await.inspect_err(|err| {
            warn!(offer_id = %offer_id, error = %err, "failed to load nearby offers");
        })?;
        self.dispatch_for_offer(offer_id, epoch, [Action::SetNearby(nearby)])
            .await;
        Ok(())
    }

    pub async fn load_reviews(&self, offer_id: &OfferId) -> Result<()> {
        let epoch = self.epoch().await;
        self.load_reviews_in(offer_id, epoch).await
    }

    async fn load_reviews_in(&self, offer_id: &OfferId, epoch: u64) -> Result<()> {
        let reviews = self.api.fetch_reviews(offer_id).await.inspect_err(|err| {
            warn!(offer_id = %offer_id, error = %err, "failed to load reviews");
        })?;
        self.dispatch_for_offer(offer_id, epoch, [Action::SetReviews(reviews)])
            .await;
        Ok(())
    }

    /// Navigates to an offer page: clears whatever page was shown, marks
    /// `offer_id` as open and loads detail, nearby offers and reviews
    /// concurrently. Returns the first failure, if any.
    pub async fn open_offer(&self, offer_id: &OfferId) -> Result<()> {
        let epoch = {
            let mut navigation = self.fence.lock().await;
            let epoch = navigation.advance(Some(offer_id.clone()));
            self.clear_offer_page();
            epoch
        };

        let (detail, nearby, reviews) = futures::join!(
            self.load_offer_detail(offer_id, epoch),
            self.load_nearby_in(offer_id, epoch),
            self.load_reviews_in(offer_id, epoch),
        );
        detail.and(nearby).and(reviews)
    }

    /// Leaves the offer page. Every response still in flight for an earlier
    /// navigation is discarded.
    pub async fn leave_offer(&self) {
        let mut navigation = self.fence.lock().await;
        navigation.advance(None);
        self.clear_offer_page();
    }

    fn clear_offer_page(&self) {
        self.store.dispatch(Action::SetOfferById(None));
        self.store.dispatch(Action::SetIsErrorOffer(false));
        self.store.dispatch(Action::SetNearby(Vec::new()));
        self.store.dispatch(Action::SetReviews(Vec::new()));
    }

    /// Posts a review and appends the stored review to the page. The pending
    /// flag is held for the whole call; a failure leaves the review list as
    /// it was.
    pub async fn post_review(&self, draft: &ReviewDraft) -> Result<Review> {
        let _pending = FlagGuard::raise(&self.store, Action::SetReviewPending);
        let epoch = self.epoch().await;
        let request = PostReviewRequest {
            comment: draft.comment().to_string(),
            rating: draft.rating(),
        };

        let review = self
            .api
            .post_review(draft.offer_id(), &request)
            .await
            .inspect_err(|err| {
                warn!(offer_id = %draft.offer_id(), error = %err, "failed to post review");
            })?;

        info!(offer_id = %draft.offer_id(), review_id = %review.id, "review posted");
        self.dispatch_for_offer(
            draft.offer_id(),
            epoch,
            [Action::PushReview(review.clone())],
        )
        .await;
        Ok(review)
    }

    pub async fn load_favorites(&self) -> Result<()> {
        if !self.store.select(selectors::authorization_status).is_authorized() {
            return Err(ClientError::Unauthorized);
        }

        let _loading = FlagGuard::raise(&self.store, Action::SetFavoritesLoadingStatus);
        let favorites = self.api.fetch_favorites().await.inspect_err(|err| {
            warn!(error = %err, "failed to load favorites");
        })?;
        self.store.dispatch(Action::SetFavorites(favorites));
        Ok(())
    }

    /// Adds or removes an offer from favorites. Without an authorized session
    /// the backend is not called and the user is sent to the login page
    /// instead; `Ok(None)` reports that case.
    pub async fn toggle_favorite(
        &self,
        offer_id: &OfferId,
        is_favorite: bool,
    ) -> Result<Option<Offer>> {
        if !self.store.select(selectors::authorization_status).is_authorized() {
            self.store.dispatch(Action::RedirectToRoute(AppRoute::Login));
            return Ok(None);
        }

        let offer = self
            .api
            .set_favorite(offer_id, is_favorite)
            .await
            .inspect_err(|err| {
                warn!(offer_id = %offer_id, error = %err, "failed to update favorite");
            })?;
        self.store.dispatch(Action::UpdateFavorite(offer.clone()));
        Ok(Some(offer))
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
