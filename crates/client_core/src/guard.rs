use shared::domain::AuthorizationStatus;

use crate::route::AppRoute;

/// Outcome of passing a protected view through [`guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    Render(V),
    Redirect(AppRoute),
    /// The auth check has not resolved; render nothing yet.
    Pending,
}

impl<V> Guarded<V> {
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Guarded<U> {
        match self {
            Self::Render(view) => Guarded::Render(f(view)),
            Self::Redirect(route) => Guarded::Redirect(route),
            Self::Pending => Guarded::Pending,
        }
    }

    pub fn into_view(self) -> Option<V> {
        match self {
            Self::Render(view) => Some(view),
            _ => None,
        }
    }
}

/// Builds the protected view only for an authorized session. `Unknown` is
/// neither authorized nor a reason to redirect.
pub fn guard<V>(status: AuthorizationStatus, view: impl FnOnce() -> V) -> Guarded<V> {
    match status {
        AuthorizationStatus::Auth => Guarded::Render(view()),
        AuthorizationStatus::NoAuth => Guarded::Redirect(AppRoute::Login),
        AuthorizationStatus::Unknown => Guarded::Pending,
    }
}

pub fn guard_route(status: AuthorizationStatus, route: AppRoute) -> Guarded<AppRoute> {
    if route.requires_auth() {
        guard(status, || route)
    } else {
        Guarded::Render(route)
    }
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;
