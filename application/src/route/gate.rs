//! [`Gate`] checking a navigation against the active session.

use service::domain::seller::{Role, Session};

/// Access requirement of a screen namespace.
///
/// Pure and synchronous: re-evaluated on every navigation against the
/// session as it is at that instant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gate {
    /// [`Role`] the namespace is reserved for, if any.
    required: Option<Role>,
}

impl Gate {
    /// Creates a [`Gate`] letting any signed-in seller through.
    #[must_use]
    pub const fn open() -> Self {
        Self { required: None }
    }

    /// Creates a [`Gate`] reserved for the given [`Role`].
    #[must_use]
    pub const fn require(role: Role) -> Self {
        Self { required: Some(role) }
    }

    /// Checks the given `session` against this [`Gate`].
    #[must_use]
    pub fn check(&self, session: Option<&Session>) -> Verdict {
        match session {
            None => Verdict::ToLogin,
            Some(session) => match self.required {
                None => Verdict::Allow,
                Some(required) if session.seller.role == required => {
                    Verdict::Allow
                }
                // A wrong role reads the same as a missing route.
                Some(_) => Verdict::ToNotFound,
            },
        }
    }
}

/// Outcome of a [`Gate`] check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// Navigation may proceed.
    Allow,

    /// No session: redirect to the login screen.
    ToLogin,

    /// Role mismatch: present the not-found screen.
    ToNotFound,
}
