//! Routes and the Route Guard
//!
//! Token presence alone gates the dashboard; nothing about the token is
//! inspected client-side.

use std::fmt;
use std::time::Duration;

/// Pause between a successful login/register alert and the dashboard redirect
pub const NAVIGATE_DELAY: Duration = Duration::from_secs(1);

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Whether the route needs a session token
    pub const fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }

    /// Resolve a path. `/` maps to the dashboard.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" | "/dashboard" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What a view should do after a guard check or an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Route),
}

/// Route guard: render protected routes only when a token is present
pub fn guard(route: Route, token: Option<&str>) -> Navigation {
    let has_token = token.map(|t| !t.is_empty()).unwrap_or(false);
    if route.is_protected() && !has_token {
        Navigation::Redirect(Route::Login)
    } else {
        Navigation::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_without_token() {
        assert_eq!(guard(Route::Dashboard, None), Navigation::Redirect(Route::Login));
        assert_eq!(guard(Route::Dashboard, Some("")), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_allows_any_token() {
        assert_eq!(guard(Route::Dashboard, Some("not-even-a-jwt")), Navigation::Stay);
    }

    #[test]
    fn test_public_routes_open() {
        assert_eq!(guard(Route::Login, None), Navigation::Stay);
        assert_eq!(guard(Route::Register, None), Navigation::Stay);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/login/"), Some(Route::Login));
        assert_eq!(Route::from_path("/register"), Some(Route::Register));
        assert_eq!(Route::from_path("/nope"), None);
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
    }
}
