//! The two screens of the application and the seam used to switch between them.

use std::fmt;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Editor,
    Preview,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Editor => "/editor",
            Route::Preview => "/preview",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Anything that can be told to show another screen.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct History {
    routes: Vec<Route>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.routes.last().copied()
    }

    #[cfg(test)]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Navigator for History {
    fn navigate(&mut self, route: Route) {
        debug!(%route, "navigate");
        self.routes.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_records_routes_in_order() {
        let mut history = History::new();
        assert_eq!(history.current(), None);

        history.navigate(Route::Preview);
        history.navigate(Route::Editor);
        assert_eq!(history.routes(), &[Route::Preview, Route::Editor]);
        assert_eq!(history.current(), Some(Route::Editor));
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::Editor.to_string(), "/editor");
        assert_eq!(Route::Preview.path(), "/preview");
    }
}
