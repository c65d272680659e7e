use std::fmt;

use shared::domain::OfferId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Main,
    Login,
    Offer(OfferId),
    Favorites,
    NotFound,
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            Self::Main => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Offer(id) => format!("/offer/{id}"),
            Self::Favorites => "/favorites".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Matches a location path against the routing table. Anything that does
    /// not match lands on the catch-all.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Self::Main,
            "/login" => Self::Login,
            "/favorites" => Self::Favorites,
            _ => match trimmed.strip_prefix("/offer/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Offer(OfferId::new(id)),
                _ => Self::NotFound,
            },
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Favorites)
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
