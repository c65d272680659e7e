use std::sync::Arc;

use super::*;
use crate::{
    action::Action,
    store::{NotificationLevel, Store, StoreEvent},
    test_support::{comment_of_len, sample_review, FakeApi},
};
use tokio::sync::broadcast::{self, error::TryRecvError};

fn orchestrator(api: FakeApi) -> Arc<Orchestrator<FakeApi>> {
    Arc::new(Orchestrator::new(Arc::new(Store::default()), Arc::new(api)))
}

fn filled_form(offer_id: &str) -> ReviewForm {
    let mut form = ReviewForm::new(OfferId::new(offer_id));
    form.set_rating(Some(4));
    form.set_comment(comment_of_len(80));
    form
}

fn error_notifications(events: &mut broadcast::Receiver<StoreEvent>) -> Vec<String> {
    let mut messages = Vec::new();
    loop {
        match events.try_recv() {
            Ok(StoreEvent::Notification(notification))
                if notification.level == NotificationLevel::Error =>
            {
                messages.push(notification.message)
            }
            Ok(_) | Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return messages,
        }
    }
}

#[test]
fn comment_length_boundaries() {
    assert_eq!(
        validate_review(Some(3), &comment_of_len(50)),
        Err(ReviewValidationError::CommentTooShort(50))
    );
    assert_eq!(validate_review(Some(3), &comment_of_len(51)), Ok(3));
    assert_eq!(validate_review(Some(3), &comment_of_len(300)), Ok(3));
    assert_eq!(
        validate_review(Some(3), &comment_of_len(301)),
        Err(ReviewValidationError::CommentTooLong(301))
    );
}

#[test]
fn rating_is_required_and_bounded() {
    let comment = comment_of_len(60);
    assert_eq!(
        validate_review(None, &comment),
        Err(ReviewValidationError::MissingRating)
    );
    assert_eq!(
        validate_review(Some(0), &comment),
        Err(ReviewValidationError::RatingOutOfRange(0))
    );
    assert_eq!(
        validate_review(Some(6), &comment),
        Err(ReviewValidationError::RatingOutOfRange(6))
    );
    assert!(is_review_valid(Some(1), &comment));
    assert!(is_review_valid(Some(5), &comment));
}

#[test]
fn comment_length_counts_characters_not_bytes() {
    let comment = "é".repeat(200);
    assert!(comment.len() > MAX_COMMENT_LENGTH);
    assert!(is_review_valid(Some(2), &comment));
    assert!(!is_review_valid(Some(2), &"ü".repeat(50)));
}

#[test]
fn draft_requires_valid_input() {
    let draft = ReviewDraft::new(OfferId::new("1"), Some(5), comment_of_len(51)).expect("valid");
    assert_eq!(draft.rating(), 5);
    assert_eq!(draft.offer_id().as_str(), "1");

    let err = ReviewDraft::new(OfferId::new("1"), Some(5), "too short").expect_err("short");
    assert_eq!(err, ReviewValidationError::CommentTooShort(9));
}

#[test]
fn submit_control_tracks_validity_and_pending_flag() {
    let store = Store::default();
    let mut form = ReviewForm::new(OfferId::new("1"));
    assert!(!form.can_submit(&store.state()));

    form.set_rating(Some(5));
    form.set_comment(comment_of_len(51));
    assert!(form.can_submit(&store.state()));

    store.dispatch(Action::SetReviewPending(true));
    assert!(!form.can_submit(&store.state()));
}

#[tokio::test]
async fn successful_submit_clears_form_and_appends_review() {
    let orchestrator = orchestrator(FakeApi {
        reviews: [(OfferId::new("1"), vec![sample_review("r1", "1", 2)])].into(),
        ..FakeApi::default()
    });
    orchestrator.load_reviews(&OfferId::new("1")).await.expect("reviews");
    let mut events = orchestrator.store().subscribe_events();
    let mut form = filled_form("1");

    let review = form.submit(&orchestrator).await.expect("submit");
    assert_eq!(review.rating, 4);
    assert_eq!(form.rating(), None);
    assert!(form.comment().is_empty());

    let state = orchestrator.store().state();
    assert_eq!(state.review_data.len(), 2);
    assert!(!state.is_review_pending);
    assert!(error_notifications(&mut events).is_empty());
}

#[tokio::test]
async fn failed_submit_notifies_once_and_keeps_input() {
    let orchestrator = orchestrator(FakeApi::failing(&["post_review"]));
    let mut events = orchestrator.store().subscribe_events();
    let mut form = filled_form("1");

    let err = form.submit(&orchestrator).await.expect_err("backend fails");
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        error_notifications(&mut events),
        vec![SUBMIT_FAILED_MESSAGE.to_string()]
    );

    assert_eq!(form.rating(), Some(4));
    assert_eq!(form.comment().chars().count(), 80);
    assert!(!orchestrator.store().state().is_review_pending);
    assert!(orchestrator.store().state().review_data.is_empty());
}

#[tokio::test]
async fn invalid_submit_never_reaches_backend() {
    let orchestrator = orchestrator(FakeApi::default());
    let mut form = ReviewForm::new(OfferId::new("1"));
    form.set_comment(comment_of_len(100));

    let err = form.submit(&orchestrator).await.expect_err("no rating");
    assert!(matches!(
        err,
        ClientError::InvalidReview(ReviewValidationError::MissingRating)
    ));
    assert_eq!(orchestrator.api().calls("post_review"), 0);
}

#[tokio::test]
async fn second_submit_while_pending_is_rejected() {
    let orchestrator = orchestrator(FakeApi::default());
    let gate = orchestrator.api().gate("post_review");

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { filled_form("1").submit(&orchestrator).await })
    };
    gate.started.await.expect("first post started");

    let err = filled_form("1")
        .submit(&orchestrator)
        .await
        .expect_err("already pending");
    assert!(matches!(err, ClientError::SubmissionInFlight));

    let _ = gate.release.send(());
    first.await.expect("join").expect("first submit");
    assert_eq!(orchestrator.api().calls("post_review"), 1);
}
