//! Client view table.
//!
//! Each view has a path pattern (segments starting with `:` are parameters),
//! a name, an optional page title and an access rule.

use tomato_mall_core::Role;

use crate::login_state::LoginState;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Who may open a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    LoggedIn,
    /// Logged in with one of these roles.
    Roles(&'static [Role]),
}

/// A client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub title: Option<&'static str>,
    pub access: Access,
}

/// Outcome of checking a route against the login state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    /// The view needs a login and there is none.
    RedirectToLogin,
    /// Logged in, but with the wrong role.
    Forbidden,
}

/// A concrete path matched to its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static Route,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    /// Value of a path parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// All client views.
pub static ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "index",
        title: None,
        access: Access::Public,
    },
    Route {
        path: "/cart",
        name: "cart",
        title: None,
        access: Access::LoggedIn,
    },
    Route {
        path: "/warehouse",
        name: "warehouse",
        title: None,
        access: Access::Roles(&[Role::Admin, Role::Shopkeeper, Role::Staff]),
    },
    Route {
        path: "/register",
        name: "register",
        title: Some("Register"),
        access: Access::Public,
    },
    Route {
        path: LOGIN_PATH,
        name: "login",
        title: Some("Log in"),
        access: Access::Public,
    },
    Route {
        path: "/user",
        name: "user",
        title: Some("My account"),
        access: Access::LoggedIn,
    },
    Route {
        path: "/product/:id",
        name: "product",
        title: Some("Product details"),
        access: Access::Public,
    },
    Route {
        path: "/checkout",
        name: "checkout",
        title: Some("Confirm order"),
        access: Access::LoggedIn,
    },
    Route {
        path: "/advertisements",
        name: "advertisements",
        title: Some("Advertisements"),
        access: Access::Roles(&[Role::Admin, Role::Shopkeeper]),
    },
];

/// Look up a route by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == name)
}

/// Match a concrete path (query string and trailing slash ignored).
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    ROUTES.iter().find_map(|route| {
        let pattern: Vec<&'static str> =
            route.path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (expected, actual) in pattern.iter().copied().zip(segments.iter().copied()) {
            if let Some(name) = expected.strip_prefix(':') {
                params.push((name, actual.to_string()));
            } else if expected != actual {
                return None;
            }
        }
        Some(RouteMatch { route, params })
    })
}

/// Decide whether `state` may open `route`.
#[must_use]
pub fn authorize(route: &Route, state: &LoginState) -> Authorization {
    match route.access {
        Access::Public => Authorization::Allowed,
        _ if !state.is_login => Authorization::RedirectToLogin,
        Access::LoggedIn => Authorization::Allowed,
        Access::Roles(roles) if state.has_any_role(roles) => Authorization::Allowed,
        Access::Roles(_) => Authorization::Forbidden,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_paths() {
        assert_eq!(resolve("/").unwrap().route.name, "index");
        assert_eq!(resolve("/cart").unwrap().route.name, "cart");
        assert_eq!(resolve("/login/").unwrap().route.name, "login");
        assert_eq!(resolve("/checkout?from=cart").unwrap().route.name, "checkout");
        assert!(resolve("/nowhere").is_none());
    }

    #[test]
    fn test_resolve_parameterized_path() {
        let matched = resolve("/product/42").unwrap();
        assert_eq!(matched.route.name, "product");
        assert_eq!(matched.param("id"), Some("42"));
        assert_eq!(matched.param("slug"), None);
        assert!(resolve("/product").is_none());
        assert!(resolve("/product/42/reviews").is_none());
    }

    #[test]
    fn test_route_names_are_unique() {
        for route in ROUTES {
            assert_eq!(by_name(route.name).unwrap().path, route.path);
        }
    }

    #[test]
    fn test_authorize_public_route_for_anyone() {
        let route = by_name("index").unwrap();
        assert_eq!(authorize(route, &LoginState::anonymous()), Authorization::Allowed);
    }

    #[test]
    fn test_authorize_protected_route_redirects_when_logged_out() {
        let route = by_name("cart").unwrap();
        assert_eq!(
            authorize(route, &LoginState::anonymous()),
            Authorization::RedirectToLogin
        );
        let customer = LoginState::from_parts(true, Some(Role::Customer), None);
        assert_eq!(authorize(route, &customer), Authorization::Allowed);
    }

    #[test]
    fn test_authorize_role_restricted_route() {
        let route = by_name("advertisements").unwrap();
        let customer = LoginState::from_parts(true, Some(Role::Customer), None);
        let owner = LoginState::from_parts(true, Some(Role::Shopkeeper), None);
        assert_eq!(authorize(route, &customer), Authorization::Forbidden);
        assert_eq!(authorize(route, &owner), Authorization::Allowed);
        assert_eq!(
            authorize(route, &LoginState::anonymous()),
            Authorization::RedirectToLogin
        );
    }
}
