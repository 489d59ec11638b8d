//! Navigation gating based on session state

use std::sync::Arc;

use crate::session::SessionStore;

/// The application's navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The combined login/registration screen; the only public route
    Login,
    /// The emissions dashboard, served at the root path
    Dashboard,
    /// The activity input form
    DataEntry,
    /// Report generation, history and export
    Reports,
}

impl Route {
    /// Whether entering this route requires an authenticated session
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login)
    }

    /// The path this route is served under
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::DataEntry => "/input",
            Route::Reports => "/reports",
        }
    }
}

/// Gates navigation on the shared session store
pub struct RouteGuard {
    session: Arc<SessionStore>,
}

impl RouteGuard {
    /// Create a guard over the given session store
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Whether the route may be entered right now. Purely a function of
    /// `is_authenticated` for protected routes; public routes always pass.
    pub fn can_enter(&self, route: Route) -> bool {
        !route.requires_auth() || self.session.is_authenticated()
    }

    /// Where the invoking layer should redirect instead of rendering the
    /// requested route, if anywhere. A logged-in user never sees the login
    /// screen, and a logged-out user never sees a protected screen.
    pub fn redirect_for(&self, route: Route) -> Option<Route> {
        if route.requires_auth() && !self.session.is_authenticated() {
            Some(Route::Login)
        } else if route == Route::Login && self.session.is_authenticated() {
            Some(Route::Dashboard)
        } else {
            None
        }
    }
}
