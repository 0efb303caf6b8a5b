use alloc::string::String;
use thiserror::Error;

/// Errors surfaced by [`RoundRobin::has_next`](crate::RoundRobin::has_next) and
/// [`RoundRobin::next_item`](crate::RoundRobin::next_item)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError<E> {
    /// The configured inequality handling is not one of the known policies (or was never set).
    /// This is a configuration bug: it is reported on every call and never goes away.
    #[error("Unknown inequality handling option was passed in: {0}")]
    InvalidPolicy(String),

    /// A producer operation failed. The producer's error is passed through as is.
    #[error(transparent)]
    Producer(E),
}

/// Errors from [`Builder::build`](crate::round_robin::Builder::build)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Round-robin over zero producers is meaningless
    #[error("At least one producer is required")]
    NoProducers,

    /// Requested more producers than the collaborator provides
    #[error("Requested {requested} producers, but only {available} are available")]
    TooManyProducers { requested: usize, available: usize },
}

/// A string did not name any [`InequalityHandling`](crate::InequalityHandling)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized inequality handling `{0}`, expected one of RESET, RELOCATE, PASS_NULL, STOP_EVERYONE")]
pub struct ParsePolicyError(pub String);
