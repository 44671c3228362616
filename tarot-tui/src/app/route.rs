//! Screen routes
//!
//! Routes mirror the service's web paths so a session can be opened at a
//! given screen (`--open /reading/42`). The shuffle route carries no data in
//! its path; its parameters only travel as a navigation hand-off.

use std::fmt;
use std::str::FromStr;

use libtarot::ReadingId;

use crate::error::TuiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` - deck, spread and question selection
    Home,
    /// `/shuffle` - requires a hand-off from the home screen
    Shuffle,
    /// `/reading/{id}` - a created reading, loaded by id
    Reading(ReadingId),
}

impl Route {
    /// Parse a route path such as `/`, `/shuffle` or `/reading/42`
    pub fn parse(path: &str) -> Result<Self, TuiError> {
        let trimmed = path.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(TuiError::Route(format!(
                "'{}' must start with '/'",
                trimmed
            )));
        };

        if rest.is_empty() {
            return Ok(Route::Home);
        }
        // A single trailing slash is allowed; any other empty segment is not
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TuiError::Route(format!("malformed route '{}'", trimmed)));
        }

        match segments.as_slice() {
            ["shuffle"] => Ok(Route::Shuffle),
            ["reading", id] => id
                .parse::<i64>()
                .map(|id| Route::Reading(ReadingId(id)))
                .map_err(|_| TuiError::Route(format!("'{}' is not a reading id", id))),
            _ => Err(TuiError::Route(format!("unknown route '{}'", trimmed))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Shuffle => "/shuffle".to_string(),
            Route::Reading(id) => format!("/reading/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = TuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}
