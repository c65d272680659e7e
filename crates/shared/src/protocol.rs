use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{OfferId, Profile, Review, ReviewId, User};

/// Review as listed by `GET /comments/{offerId}`; the offer id is implied by
/// the request path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub id: ReviewId,
    pub date: DateTime<Utc>,
    pub user: Profile,
    pub comment: String,
    pub rating: u8,
}

impl ReviewPayload {
    pub fn into_review(self, offer_id: OfferId) -> Review {
        Review {
            id: self.id,
            offer_id,
            comment: self.comment,
            rating: self.rating,
            date: self.date,
            author: self.user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReviewRequest {
    pub comment: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
    pub email: String,
    #[serde(default)]
    pub token: String,
}

impl AuthInfo {
    pub fn user(&self) -> User {
        User {
            email: self.email.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            is_pro: self.is_pro,
        }
    }
}
