use core::fmt::Display;

use displaydoc::Display;

/// A specialized result type for the bridge commands.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when preparing or sending bridge commands.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Debug)]
pub enum Error {
    /// The requested easing curve is unknown or not implemented.
    InvalidEaseKind,
    /// The parameter value lies outside of the `[0, 1]` range.
    OutOfRange,
    /// The macro parameter string cannot be parsed.
    InvalidParameter,
    /// Unable to send a command to the bridge.
    Transport,
}

impl Error {
    /// Creates a new transport error.
    pub fn transport<E>(_: E) -> Self
    where
        E: Display,
    {
        Self::Transport
    }

    /// Creates a new invalid parameter error.
    pub fn invalid_parameter<E>(_: E) -> Self
    where
        E: Display,
    {
        Self::InvalidParameter
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
