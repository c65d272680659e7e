use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Offer, OfferExtended, OfferId, Review, User},
    error::{ApiError, ApiException},
    protocol::{AuthInfo, LoginRequest, PostReviewRequest, ReviewPayload},
};
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientError, Result},
    token::TokenStore,
};

pub const TOKEN_HEADER: &str = "X-Token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend calls the orchestration layer depends on.
#[async_trait]
pub trait SixCitiesApi: Send + Sync {
    async fn fetch_offers(&self) -> Result<Vec<Offer>>;
    async fn fetch_offer_by_id(&self, offer_id: &OfferId) -> Result<OfferExtended>;
    async fn fetch_nearby(&self, offer_id: &OfferId) -> Result<Vec<Offer>>;
    async fn fetch_reviews(&self, offer_id: &OfferId) -> Result<Vec<Review>>;
    async fn post_review(&self, offer_id: &OfferId, review: &PostReviewRequest) -> Result<Review>;
    async fn check_auth(&self) -> Result<User>;
    /// Signs in and keeps the issued token for later requests.
    async fn login(&self, credentials: &LoginRequest) -> Result<User>;
    async fn logout(&self) -> Result<()>;
    async fn fetch_favorites(&self) -> Result<Vec<Offer>>;
    async fn set_favorite(&self, offer_id: &OfferId, is_favorite: bool) -> Result<Offer>;
}

pub struct HttpApi {
    http: Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration, tokens: TokenStore) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match self.tokens.token().await {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ApiError>().await.ok();
        Err(ApiException::from_response(status.as_u16(), body).into())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = Self::send(self.request(Method::GET, path).await).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SixCitiesApi for HttpApi {
    async fn fetch_offers(&self) -> Result<Vec<Offer>> {
        self.get_json("/offers").await
    }

    async fn fetch_offer_by_id(&self, offer_id: &OfferId) -> Result<OfferExtended> {
        self.get_json(&format!("/offers/{offer_id}")).await
    }

    async fn fetch_nearby(&self, offer_id: &OfferId) -> Result<Vec<Offer>> {
        self.get_json(&format!("/offers/{offer_id}/nearby")).await
    }

    async fn fetch_reviews(&self, offer_id: &OfferId) -> Result<Vec<Review>> {
        let payloads: Vec<ReviewPayload> = self.get_json(&format!("/comments/{offer_id}")).await?;
        Ok(payloads
            .into_iter()
            .map(|payload| payload.into_review(offer_id.clone()))
            .collect())
    }

    async fn post_review(&self, offer_id: &OfferId, review: &PostReviewRequest) -> Result<Review> {
        let builder = self
            .request(Method::POST, &format!("/comments/{offer_id}"))
            .await
            .json(review);
        let payload: ReviewPayload = Self::send(builder).await?.json().await?;
        Ok(payload.into_review(offer_id.clone()))
    }

    async fn check_auth(&self) -> Result<User> {
        let info: AuthInfo = self.get_json("/login").await?;
        Ok(info.user())
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<User> {
        let builder = self.request(Method::POST, "/login").await.json(credentials);
        let info: AuthInfo = Self::send(builder).await?.json().await?;
        self.tokens.save(&info.token).await?;
        Ok(info.user())
    }

    async fn logout(&self) -> Result<()> {
        Self::send(self.request(Method::DELETE, "/logout").await).await?;
        self.tokens.drop_token().await
    }

    async fn fetch_favorites(&self) -> Result<Vec<Offer>> {
        self.get_json("/favorite").await
    }

    async fn set_favorite(&self, offer_id: &OfferId, is_favorite: bool) -> Result<Offer> {
        let status = u8::from(is_favorite);
        let builder = self
            .request(Method::POST, &format!("/favorite/{offer_id}/{status}"))
            .await;
        Ok(Self::send(builder).await?.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
