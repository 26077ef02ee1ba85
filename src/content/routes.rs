use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const HISTORY_LIMIT: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Introduction,
    Submanifolds,
    SecondFundamentalForm,
    Geodesics,
    ContactNumber,
    NonOrientable,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Introduction,
        Route::Submanifolds,
        Route::SecondFundamentalForm,
        Route::Geodesics,
        Route::ContactNumber,
        Route::NonOrientable,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Introduction => "/",
            Route::Submanifolds => "/submanifolds",
            Route::SecondFundamentalForm => "/second-fundamental-form",
            Route::Geodesics => "/geodesics",
            Route::ContactNumber => "/contact-number",
            Route::NonOrientable => "/non-orientable",
        }
    }

    /// Resolves a path. One trailing slash is accepted; unknown paths give `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(stripped) => stripped,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_path(s).ok_or_else(|| Error::UnknownRoute(s.to_string()))
    }
}

/// What the page area shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Chapter(Route),
    NotFound(String),
}

impl Location {
    pub fn resolve(path: &str) -> Self {
        match Route::from_path(path) {
            Some(route) => Location::Chapter(route),
            None => Location::NotFound(path.to_string()),
        }
    }

    pub fn route(&self) -> Option<Route> {
        match self {
            Location::Chapter(route) => Some(*route),
            Location::NotFound(_) => None,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Location::Chapter(route) => route.path(),
            Location::NotFound(path) => path,
        }
    }
}

/// Current location plus a bounded back history.
#[derive(Clone, Debug)]
pub struct Router {
    current: Location,
    history: Vec<Location>,
}

impl Router {
    pub fn new(start: Location) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn navigate(&mut self, path: &str) {
        self.go(Location::resolve(path));
    }

    pub fn go(&mut self, location: Location) {
        if location == self.current {
            return;
        }
        tracing::info!(from = self.current.path(), to = location.path(), "route change");
        let previous = std::mem::replace(&mut self.current, location);
        self.history.push(previous);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }

    /// Returns false when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                tracing::info!(from = self.current.path(), to = previous.path(), "route back");
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Location::Chapter(Route::Introduction))
    }
}
