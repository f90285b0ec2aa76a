//! Client routes and the guards that gate them.

use crate::session::Session;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    PropertyDetails(i64),
    Dashboard,
    NewProperty,
    EditProperty(i64),
    Admin,
}

/// Which guards wrap a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only for visitors who are not signed in
    PublicOnly,
    Protected,
    /// Protected, and the user must be an administrator
    Admin,
}

/// Result of running a route through its guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect { to: Route, from: Option<Route> },
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::PropertyDetails(_) => Access::Public,
            Route::Login | Route::Register => Access::PublicOnly,
            Route::Dashboard | Route::NewProperty | Route::EditProperty(_) => Access::Protected,
            Route::Admin => Access::Admin,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::PropertyDetails(id) => format!("/properties/{id}"),
            Route::Dashboard => "/dashboard".to_string(),
            Route::NewProperty => "/properties/new".to_string(),
            Route::EditProperty(id) => format!("/properties/{id}/edit"),
            Route::Admin => "/admin".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["admin"] => Some(Route::Admin),
            ["properties", "new"] => Some(Route::NewProperty),
            ["properties", id] => id.parse().ok().map(Route::PropertyDetails),
            ["properties", id, "edit"] => id.parse().ok().map(Route::EditProperty),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Signed-out visitors go to login, remembering where they were headed.
pub fn require_auth(route: Route, session: &Session) -> Navigation {
    if session.is_authenticated() {
        Navigation::Allow(route)
    } else {
        Navigation::Redirect { to: Route::Login, from: Some(route) }
    }
}

/// Signed-in users are sent to their dashboard.
pub fn public_only(route: Route, session: &Session) -> Navigation {
    if session.is_authenticated() {
        Navigation::Redirect { to: Route::Dashboard, from: None }
    } else {
        Navigation::Allow(route)
    }
}

/// Anyone without an admin profile goes home.
pub fn require_admin(route: Route, session: &Session) -> Navigation {
    if session.is_admin() {
        Navigation::Allow(route)
    } else {
        Navigation::Redirect { to: Route::Home, from: None }
    }
}

/// Run `route` through every guard its access level calls for, outermost first.
pub fn resolve(route: Route, session: &Session) -> Navigation {
    match route.access() {
        Access::Public => Navigation::Allow(route),
        Access::PublicOnly => public_only(route, session),
        Access::Protected => require_auth(route, session),
        Access::Admin => match require_auth(route, session) {
            Navigation::Allow(route) => require_admin(route, session),
            redirect => redirect,
        },
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
