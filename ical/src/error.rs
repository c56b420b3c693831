// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Error types shared by the writer, the value model and the components.

use std::io;
use std::sync::Arc;

pub use crate::value::ValidationError;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while encoding iCalendar data.
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The underlying sink failed. Once raised, the writer stays failed.
    #[error("i/o failure: {0}")]
    Io(#[source] Arc<io::Error>),

    /// A value is outside the range permitted by RFC 5545.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A component is missing a property it cannot be written without.
    #[error("{component}: {property} is required")]
    MissingProperty {
        /// The component being written
        component: &'static str,
        /// The absent property
        property: &'static str,
    },

    /// A component violates a rule that spans several properties.
    #[error("{component}: {message}")]
    Constraint {
        /// The component being written
        component: &'static str,
        /// What went wrong
        message: &'static str,
    },
}

impl From<io::Error> for Error {
    /// An `io::Error` that merely carries one of ours is unwrapped again.
    fn from(err: io::Error) -> Self {
        match err.get_ref().and_then(|inner| inner.downcast_ref::<Self>()) {
            Some(inner) => inner.clone(),
            None => Self::Io(Arc::new(err)),
        }
    }
}

impl Error {
    /// Whether this error came from the output sink.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(inner) => match Arc::try_unwrap(inner) {
                Ok(err) => err,
                Err(shared) => io::Error::new(shared.kind(), Error::Io(shared)),
            },
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_arc(err: &Error) -> &Arc<io::Error> {
        match err {
            Error::Io(inner) => inner,
            other => panic!("expected an i/o error, got {other:?}"),
        }
    }

    fn carries_error(err: &io::Error) -> bool {
        err.get_ref()
            .is_some_and(|inner| inner.downcast_ref::<Error>().is_some())
    }

    #[test]
    fn unique_io_error_is_unwrapped() {
        let back = io::Error::from(Error::from(io::Error::other("disk full")));
        assert_eq!(back.kind(), io::ErrorKind::Other);
        assert!(!carries_error(&back));
        assert_eq!(back.to_string(), "disk full");
    }

    #[test]
    fn shared_io_error_round_trips_without_nesting() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        let kept = err.clone();
        let again = Error::from(io::Error::from(err));

        assert!(Arc::ptr_eq(io_arc(&again), io_arc(&kept)));
        assert_eq!(io_arc(&again).kind(), io::ErrorKind::BrokenPipe);
        assert!(!carries_error(io_arc(&again)));
    }

    #[test]
    fn constraint_error_round_trips() {
        let err = Error::Constraint {
            component: "VALARM",
            message: "bad",
        };
        let back = io::Error::from(err);
        assert_eq!(back.kind(), io::ErrorKind::InvalidData);
        assert!(matches!(
            Error::from(back),
            Error::Constraint {
                component: "VALARM",
                ..
            }
        ));
    }
}
