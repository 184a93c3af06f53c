//! Mapping of command and query failures into user-visible
//! [`Notification`]s.

use std::fmt;

use derive_more::Display;
use service::{command, infra::gateway};
use tracerr::Traced;

/// Transient user-visible message.
///
/// Every failure a command or query can produce ends up as one of these
/// at the shell boundary; nothing propagates out of the main loop.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{message}")]
pub struct Notification {
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// Creates a new [`Notification`] with the given `message`.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Conversion of an error into a user-visible [`Notification`].
pub trait AsNotification {
    /// Tries to convert this error into a [`Notification`].
    ///
    /// [`None`] is returned if the error carries no user-presentable
    /// message of its own.
    fn try_as_notification(&self) -> Option<Notification>;

    /// Converts this error into a [`Notification`], falling back onto
    /// its [`Display`] representation.
    ///
    /// [`Display`]: fmt::Display
    fn as_notification(&self) -> Notification
    where
        Self: fmt::Display,
    {
        self.try_as_notification()
            .unwrap_or_else(|| Notification::new(self.to_string()))
    }
}

impl<E: AsNotification> AsNotification for Traced<E> {
    fn try_as_notification(&self) -> Option<Notification> {
        self.as_ref().try_as_notification()
    }
}

impl AsNotification for gateway::Error {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            // A rejection carries the backend's own message verbatim.
            Self::Rejected { message } => Some(Notification::new(message)),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

impl AsNotification for command::create_session::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Store(_) => None,
        }
    }
}

impl AsNotification for command::create_booking::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Invalid(errors) => Some(field_errors(errors)),
            Self::NotAuthenticated => None,
        }
    }
}

impl AsNotification for command::update_booking::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Invalid(errors) => Some(field_errors(errors)),
            Self::NotAuthenticated => None,
        }
    }
}

impl AsNotification for command::delete_booking::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
        }
    }
}

impl AsNotification for command::export_booking::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
        }
    }
}

impl AsNotification for command::create_seller::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Forbidden | Self::NotAuthenticated => None,
        }
    }
}

impl AsNotification for command::delete_seller::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Forbidden(_) | Self::NotAuthenticated => None,
        }
    }
}

impl AsNotification for command::update_profile::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Forbidden(_) | Self::NotAuthenticated => None,
        }
    }
}

impl AsNotification for command::change_password::ExecutionError {
    fn try_as_notification(&self) -> Option<Notification> {
        match self {
            Self::Gateway(e) => e.try_as_notification(),
            Self::Forbidden(_) | Self::NotAuthenticated => None,
        }
    }
}

/// Folds per-field validation failures into a single [`Notification`].
fn field_errors(
    errors: &[service::form::booking::FieldError],
) -> Notification {
    Notification::new(
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod spec {
    use service::infra::gateway;

    use super::AsNotification as _;

    #[test]
    fn rejection_surfaces_the_carried_message() {
        let notification = gateway::Error::Rejected {
            message: "seller not found".into(),
        }
        .as_notification();

        assert_eq!(notification.message, "seller not found");
    }

    #[test]
    fn transport_failure_falls_back_onto_display() {
        let notification = gateway::Error::Transport(
            "connection refused".into(),
        )
        .as_notification();

        assert_eq!(
            notification.message,
            "transport failed: connection refused",
        );
    }
}
