//! Error taxonomy for fontmatch-core (made by FontLab https://www.fontlab.com/)

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while listing, matching, or loading fonts.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog or content provider could not be initialised.
    #[error("font backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The capability has no implementation on this platform.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Caller input violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The catalog snapshot holds no usable fonts.
    #[error("no fonts found")]
    NoFontsFound,

    /// An underlying platform call failed.
    #[error("system error: {message}")]
    System {
        message: String,
        #[source]
        source: Option<io::Error>,
    },
}

/// Copyable discriminant of [`Error`], handy for assertions and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BackendUnavailable,
    NotImplemented,
    InvalidArgument,
    NoFontsFound,
    SystemError,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BackendUnavailable(_) => ErrorKind::BackendUnavailable,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NoFontsFound => ErrorKind::NoFontsFound,
            Error::System { .. } => ErrorKind::SystemError,
        }
    }

    pub(crate) fn system(message: impl Into<String>) -> Self {
        Error::System {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::System {
            message: message.into(),
            source: Some(source),
        }
    }
}
