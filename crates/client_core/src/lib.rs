//! Application core of the "6 cities" rental listing client.
//!
//! State lives in a [`Store`] and changes only through [`Action`]s run by
//! [`reduce`]. The [`Orchestrator`] talks to the backend through
//! [`SixCitiesApi`] and turns responses into actions; views read the state
//! through [`selectors`] and gate protected pages with [`guard`].

pub mod action;
pub mod api;
pub mod error;
pub mod guard;
pub mod orchestration;
pub mod reducer;
pub mod review_form;
pub mod route;
pub mod selectors;
pub mod state;
pub mod store;
pub mod token;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

pub use action::Action;
pub use api::{HttpApi, SixCitiesApi, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use guard::{guard, guard_route, Guarded};
pub use orchestration::Orchestrator;
pub use reducer::reduce;
pub use review_form::{validate_review, ReviewDraft, ReviewForm, ReviewValidationError};
pub use route::AppRoute;
pub use selectors::{OfferPageView, SortOption};
pub use state::AppState;
pub use store::{Notification, NotificationLevel, Store, StoreEvent};
pub use token::TokenStore;
