use shared::domain::{OfferId, Review};
use thiserror::Error;

use crate::{
    api::SixCitiesApi,
    error::{ClientError, Result},
    orchestration::Orchestrator,
    selectors::is_review_pending,
    state::AppState,
    store::Notification,
};

/// Comments must be strictly longer than this many characters.
pub const MIN_COMMENT_LENGTH: usize = 50;
pub const MAX_COMMENT_LENGTH: usize = 300;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const SUBMIT_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    #[error("a rating is required")]
    MissingRating,
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("comment must be longer than 50 characters, got {0}")]
    CommentTooShort(usize),
    #[error("comment must be at most 300 characters, got {0}")]
    CommentTooLong(usize),
}

/// Checks a rating and comment against the submission rules and returns the
/// accepted rating.
pub fn validate_review(
    rating: Option<u8>,
    comment: &str,
) -> std::result::Result<u8, ReviewValidationError> {
    let rating = rating.ok_or(ReviewValidationError::MissingRating)?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewValidationError::RatingOutOfRange(rating));
    }

    let length = comment.chars().count();
    if length <= MIN_COMMENT_LENGTH {
        return Err(ReviewValidationError::CommentTooShort(length));
    }
    if length > MAX_COMMENT_LENGTH {
        return Err(ReviewValidationError::CommentTooLong(length));
    }

    Ok(rating)
}

pub fn is_review_valid(rating: Option<u8>, comment: &str) -> bool {
    validate_review(rating, comment).is_ok()
}

/// A review that passed validation and is ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    offer_id: OfferId,
    comment: String,
    rating: u8,
}

impl ReviewDraft {
    pub fn new(
        offer_id: OfferId,
        rating: Option<u8>,
        comment: impl Into<String>,
    ) -> std::result::Result<Self, ReviewValidationError> {
        let comment = comment.into();
        let rating = validate_review(rating, &comment)?;
        Ok(Self {
            offer_id,
            comment,
            rating,
        })
    }

    pub fn offer_id(&self) -> &OfferId {
        &self.offer_id
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }
}

/// Local state of the review form on an offer page.
#[derive(Debug, Clone)]
pub struct ReviewForm {
    offer_id: OfferId,
    rating: Option<u8>,
    comment: String,
}

impl ReviewForm {
    pub fn new(offer_id: OfferId) -> Self {
        Self {
            offer_id,
            rating: None,
            comment: String::new(),
        }
    }

    pub fn set_rating(&mut self, rating: Option<u8>) {
        self.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_valid(&self) -> bool {
        is_review_valid(self.rating, &self.comment)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, state: &AppState) -> bool {
        self.is_valid() && !is_review_pending(state)
    }

    pub fn reset(&mut self) {
        self.rating = None;
        self.comment.clear();
    }

    /// Posts the form. An invalid form or one with a submission already in
    /// flight is rejected without touching the backend. A failed post raises
    /// one error notification and keeps the entered text; a successful one
    /// clears the form.
    pub async fn submit<A: SixCitiesApi>(
        &mut self,
        orchestrator: &Orchestrator<A>,
    ) -> Result<Review> {
        let draft = ReviewDraft::new(self.offer_id.clone(), self.rating, self.comment.clone())?;
        if orchestrator.store().select(is_review_pending) {
            return Err(ClientError::SubmissionInFlight);
        }

        match orchestrator.post_review(&draft).await {
            Ok(review) => {
                self.reset();
                Ok(review)
            }
            Err(err) => {
                orchestrator
                    .store()
                    .notify(Notification::error(SUBMIT_FAILED_MESSAGE));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/review_form_tests.rs"]
mod tests;
