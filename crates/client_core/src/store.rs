use shared::domain::City;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::{action::Action, reducer::reduce, route::AppRoute, state::AppState};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient, user-visible message (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Redirect(AppRoute),
    Notification(Notification),
}

/// Single owner of [`AppState`].
///
/// The only way to change the state is [`Store::dispatch`]. Readers either
/// take snapshots, run selectors against the current state, or watch it
/// through [`Store::subscribe`]. Redirects and notifications are side
/// channels published on [`Store::subscribe_events`].
pub struct Store {
    state: watch::Sender<AppState>,
    events: broadcast::Sender<StoreEvent>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { state, events }
    }

    pub fn with_default_city(city: City) -> Self {
        Self::new(AppState::with_city(city))
    }

    /// Runs the reducer for `action`. Calls are applied one at a time in the
    /// order they are made; watchers only wake when the state changed.
    pub fn dispatch(&self, action: Action) {
        let name = action.name();
        let redirect = match &action {
            Action::RedirectToRoute(route) => Some(route.clone()),
            _ => None,
        };

        let changed = self.state.send_if_modified(|state| {
            let next = reduce(state, action);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
        debug!(action = name, changed, "dispatched action");

        if let Some(route) = redirect {
            info!(route = %route, "redirect requested");
            let _ = self.events.send(StoreEvent::Redirect(route));
        }
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Applies `selector` to the current state. The state is read-locked for
    /// the duration of the call, so the selector must not dispatch.
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!(message = %notification.message, "notification"),
            NotificationLevel::Error => error!(message = %notification.message, "notification"),
        }
        let _ = self.events.send(StoreEvent::Notification(notification));
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
