//! Route resolution: path parsing, the auth [`Gate`] and role dispatch.

pub mod gate;

use service::domain::seller::{Role, Session};

pub use self::gate::{Gate, Verdict};

/// Screen of the admin namespace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdminScreen {
    /// Global dashboard with headline statistics.
    Dashboard,

    /// Seller directory.
    Sellers,

    /// Listing of every booking.
    Bookings,
}

/// Screen of the staff namespace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StaffScreen {
    /// Personal dashboard of the signed-in seller.
    Dashboard,

    /// Listing of the signed-in seller's own bookings.
    Bookings,
}

/// Resolved target of a navigation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Destination {
    /// Login screen.
    Login,

    /// Screen of the admin namespace.
    Admin(AdminScreen),

    /// Screen of the staff namespace.
    Staff(StaffScreen),

    /// Not-found screen, for unknown paths and foreign namespaces alike.
    NotFound,
}

/// Parsed navigation path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Path {
    /// `/login`.
    Login,

    /// `/`, an alias of the signed-in role's dashboard.
    Root,

    /// `/admin` namespace.
    Admin(AdminScreen),

    /// `/staff` namespace.
    Staff(StaffScreen),

    /// Anything else.
    Unknown,
}

impl Path {
    /// Parses the given raw `path`.
    fn parse(path: &str) -> Self {
        let mut segments =
            path.split('/').filter(|segment| !segment.is_empty());

        let parsed = match (segments.next(), segments.next()) {
            (None, _) => Self::Root,
            (Some("login"), None) => Self::Login,
            (Some("admin"), None | Some("dashboard")) => {
                Self::Admin(AdminScreen::Dashboard)
            }
            (Some("admin"), Some("sellers")) => {
                Self::Admin(AdminScreen::Sellers)
            }
            (Some("admin"), Some("bookings")) => {
                Self::Admin(AdminScreen::Bookings)
            }
            (Some("staff"), None | Some("dashboard")) => {
                Self::Staff(StaffScreen::Dashboard)
            }
            (Some("staff"), Some("bookings")) => {
                Self::Staff(StaffScreen::Bookings)
            }
            (Some(_), _) => Self::Unknown,
        };

        if segments.next().is_some() {
            return Self::Unknown;
        }
        parsed
    }
}

/// Resolver of navigation paths into [`Destination`]s.
#[derive(Clone, Copy, Debug)]
pub struct Router;

impl Router {
    /// Resolves the given `path` against the `session` active at this
    /// instant.
    ///
    /// Role dispatch is an exhaustive match on the closed [`Role`] kind,
    /// and each namespace is re-checked by its own [`Gate`], so a screen
    /// reached by any future path still cannot outrun its namespace
    /// requirement.
    #[must_use]
    pub fn resolve(path: &str, session: Option<&Session>) -> Destination {
        use Destination as D;

        match Path::parse(path) {
            Path::Login | Path::Root => match session {
                None => D::Login,
                Some(session) => match session.seller.role {
                    Role::Admin => D::Admin(AdminScreen::Dashboard),
                    Role::Staff => D::Staff(StaffScreen::Dashboard),
                },
            },
            Path::Admin(screen) => {
                match Gate::require(Role::Admin).check(session) {
                    Verdict::Allow => D::Admin(screen),
                    Verdict::ToLogin => D::Login,
                    Verdict::ToNotFound => D::NotFound,
                }
            }
            Path::Staff(screen) => {
                match Gate::require(Role::Staff).check(session) {
                    Verdict::Allow => D::Staff(screen),
                    Verdict::ToLogin => D::Login,
                    Verdict::ToNotFound => D::NotFound,
                }
            }
            Path::Unknown => D::NotFound,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::seller::{session::Token, Role, Session};

    use super::{AdminScreen, Destination, Gate, Router, StaffScreen, Verdict};

    fn session(role: Role) -> Session {
        Session {
            seller: serde_json::from_str(&format!(
                r#"{{
                    "id": 42,
                    "fullName": "Test Seller",
                    "email": "seller@travel.vn",
                    "role": "{role}"
                }}"#,
            ))
            .unwrap(),
            token: Token::from("opaque"),
        }
    }

    #[test]
    fn unauthenticated_paths_resolve_to_login() {
        for path in [
            "/",
            "/admin",
            "/admin/dashboard",
            "/admin/sellers",
            "/admin/bookings",
            "/staff",
            "/staff/bookings",
        ] {
            assert_eq!(
                Router::resolve(path, None),
                Destination::Login,
                "`{path}` should resolve to login",
            );
        }
    }

    #[test]
    fn foreign_namespace_reads_as_not_found() {
        let staff = session(Role::Staff);
        for path in ["/admin", "/admin/sellers", "/admin/bookings"] {
            assert_eq!(
                Router::resolve(path, Some(&staff)),
                Destination::NotFound,
            );
        }

        let admin = session(Role::Admin);
        for path in ["/staff", "/staff/bookings"] {
            assert_eq!(
                Router::resolve(path, Some(&admin)),
                Destination::NotFound,
            );
        }
    }

    #[test]
    fn root_lands_on_the_role_dashboard() {
        assert_eq!(
            Router::resolve("/", Some(&session(Role::Admin))),
            Destination::Admin(AdminScreen::Dashboard),
        );
        assert_eq!(
            Router::resolve("/", Some(&session(Role::Staff))),
            Destination::Staff(StaffScreen::Dashboard),
        );
    }

    #[test]
    fn own_namespace_is_allowed() {
        assert_eq!(
            Router::resolve("/staff/bookings", Some(&session(Role::Staff))),
            Destination::Staff(StaffScreen::Bookings),
        );
        assert_eq!(
            Router::resolve("/admin/sellers", Some(&session(Role::Admin))),
            Destination::Admin(AdminScreen::Sellers),
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        for path in ["/nope", "/admin/reports", "/staff/sellers", "/a/b/c"] {
            assert_eq!(
                Router::resolve(path, Some(&session(Role::Admin))),
                Destination::NotFound,
                "`{path}` should resolve to not-found",
            );
        }
    }

    #[test]
    fn open_gate_still_demands_a_session() {
        assert_eq!(Gate::open().check(None), Verdict::ToLogin);
        assert_eq!(
            Gate::open().check(Some(&session(Role::Staff))),
            Verdict::Allow,
        );
    }
}
