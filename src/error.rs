//! Error types for guarding and constructing networks.

use std::fmt;

use thiserror::Error;

/// The value is not an instance of `vis.Network`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("value is not a vis.Network")]
pub struct NotNetworkError;

/// An option override could not be applied to the option tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// The override has no key at all
    #[error("option path is empty")]
    EmptyPath,

    /// A dotted path such as `manipulation..enabled`
    #[error("option path `{0}` has an empty segment")]
    EmptySegment(String),
}

/// A failure while building options or invoking the foreign constructor.
///
/// `F` is whatever the host runtime throws (a `JsValue` in the browser).
#[derive(Error, Debug)]
pub enum ConstructionError<F: fmt::Debug + 'static> {
    /// `vis.Network` could not be resolved from the host environment
    #[error("vis.Network is not available: {0:?}")]
    Unavailable(F),

    /// An override failed to apply
    #[error("invalid network option: {0}")]
    Option(#[from] OptionError),

    /// The host faulted while turning the option tree into an options object
    #[error("building options object failed: {0:?}")]
    Materialize(F),

    /// The constructor threw
    #[error("vis.Network constructor threw: {0:?}")]
    Constructor(F),
}

impl<F: fmt::Debug + 'static> ConstructionError<F> {
    /// The host fault behind this error, if one was thrown.
    pub fn cause(&self) -> Option<&F> {
        match self {
            ConstructionError::Unavailable(f)
            | ConstructionError::Materialize(f)
            | ConstructionError::Constructor(f) => Some(f),
            ConstructionError::Option(_) => None,
        }
    }
}

/// Everything `construct` can report.
///
/// A constructor that returns the wrong kind of object is kept apart from one
/// that faulted, so callers can tell the two apart.
#[derive(Error, Debug)]
pub enum Error<F: fmt::Debug + 'static> {
    #[error(transparent)]
    NotNetwork(#[from] NotNetworkError),

    #[error(transparent)]
    Construction(#[from] ConstructionError<F>),
}

impl<F: fmt::Debug + 'static> Error<F> {
    pub fn is_not_network(&self) -> bool {
        matches!(self, Error::NotNetwork(_))
    }

    /// The host fault behind this error, if one was thrown.
    pub fn cause(&self) -> Option<&F> {
        match self {
            Error::NotNetwork(_) => None,
            Error::Construction(e) => e.cause(),
        }
    }
}

impl<F: fmt::Debug + 'static> From<OptionError> for Error<F> {
    fn from(e: OptionError) -> Self {
        Error::Construction(ConstructionError::Option(e))
    }
}
