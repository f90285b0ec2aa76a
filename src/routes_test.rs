use super::*;
use crate::api::fake::sample_user;
use crate::models::Role;

fn signed_out() -> Session {
    Session::default()
}

fn signed_in(role: Role) -> Session {
    Session { token: Some("t".into()), user: Some(sample_user(1, role)) }
}

const PROTECTED: [Route; 4] = [Route::Dashboard, Route::NewProperty, Route::EditProperty(3), Route::Admin];

#[test]
fn signed_out_visits_to_protected_routes_go_to_login() {
    for route in PROTECTED {
        assert_eq!(
            resolve(route, &signed_out()),
            Navigation::Redirect { to: Route::Login, from: Some(route) }
        );
    }
}

#[test]
fn signed_in_visits_to_public_only_routes_go_to_dashboard() {
    for session in [signed_in(Role::Customer), signed_in(Role::Admin)] {
        for route in [Route::Login, Route::Register] {
            assert_eq!(resolve(route, &session), Navigation::Redirect { to: Route::Dashboard, from: None });
        }
    }
}

#[test]
fn non_admin_visit_to_admin_goes_home() {
    assert_eq!(
        resolve(Route::Admin, &signed_in(Role::Customer)),
        Navigation::Redirect { to: Route::Home, from: None }
    );
    // token without a cached profile is still not an admin
    let token_only = Session { token: Some("t".into()), user: None };
    assert_eq!(resolve(Route::Admin, &token_only), Navigation::Redirect { to: Route::Home, from: None });
}

#[test]
fn allowed_visits_pass_through() {
    assert_eq!(resolve(Route::Admin, &signed_in(Role::Admin)), Navigation::Allow(Route::Admin));
    assert_eq!(resolve(Route::Dashboard, &signed_in(Role::Customer)), Navigation::Allow(Route::Dashboard));
    assert_eq!(resolve(Route::Login, &signed_out()), Navigation::Allow(Route::Login));
    assert_eq!(resolve(Route::Home, &signed_out()), Navigation::Allow(Route::Home));
    assert_eq!(
        resolve(Route::PropertyDetails(8), &signed_out()),
        Navigation::Allow(Route::PropertyDetails(8))
    );
}

#[test]
fn paths_parse_back_to_routes() {
    for route in [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::PropertyDetails(42),
        Route::Dashboard,
        Route::NewProperty,
        Route::EditProperty(42),
        Route::Admin,
    ] {
        assert_eq!(Route::parse(&route.path()), Some(route));
    }
    assert_eq!(Route::parse("/properties/abc"), None);
    assert_eq!(Route::parse("/nowhere"), None);
    assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
}
