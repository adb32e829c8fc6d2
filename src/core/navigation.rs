use std::fmt;

use tracing::debug;

use crate::core::session::{Session, SessionStore};

/// The three views the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SubmitFeedback,
    Login,
    Feedbacks,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::SubmitFeedback, Route::Login, Route::Feedbacks];

    pub fn path(self) -> &'static str {
        match self {
            Route::SubmitFeedback => "/",
            Route::Login => "/login",
            Route::Feedbacks => "/feedbacks",
        }
    }

    /// Exact match on the route table; `None` for anything else.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        Route::ALL.into_iter().find(|route| {
            let own = route.path().trim_end_matches('/');
            own == trimmed
        })
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::SubmitFeedback => "Submit Feedback",
            Route::Login => "Admin Login",
            Route::Feedbacks => "Feedback Dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of visiting a path: the view that ends up mounted and, if it is not
/// the one asked for, the path that was redirected away from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub route: Route,
    pub redirected_from: Option<String>,
}

impl Visit {
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Resolves a path against the route table and the dashboard's auth gate.
///
/// Unknown paths fall back to the submission form; the dashboard sends
/// visitors without an admin session to the login view.
pub fn visit<S: SessionStore>(path: &str, session: &Session<S>) -> Visit {
    let requested = Route::from_path(path);
    let route = match requested {
        None => Route::SubmitFeedback,
        Some(Route::Feedbacks) if !session.is_authenticated() => Route::Login,
        Some(route) => route,
    };
    let redirected_from = (requested != Some(route)).then(|| path.to_string());
    if let Some(from) = &redirected_from {
        debug!(from = %from, to = %route, "Redirected");
    }
    Visit {
        route,
        redirected_from,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Route),
    Logout,
}

/// One entry of the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub action: NavAction,
    pub active: bool,
}

/// Top bar entries for the current session and view.
///
/// The admin login button hides itself while the login view is showing.
pub fn nav_items(authenticated: bool, current: Route) -> Vec<NavItem> {
    let mut items = vec![NavItem {
        label: "Submit Feedback",
        action: NavAction::Go(Route::SubmitFeedback),
        active: current == Route::SubmitFeedback,
    }];
    if authenticated {
        items.push(NavItem {
            label: "Admin Panel",
            action: NavAction::Go(Route::Feedbacks),
            active: current == Route::Feedbacks,
        });
        items.push(NavItem {
            label: "Logout",
            action: NavAction::Logout,
            active: false,
        });
    } else if current != Route::Login {
        items.push(NavItem {
            label: "Admin Login",
            action: NavAction::Go(Route::Login),
            active: false,
        });
    }
    items
}
