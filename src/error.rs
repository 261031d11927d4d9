use std::fmt;

use thiserror::Error;

use crate::grid::Cell;

/// Convenient result alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of the requested route an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds { height: usize, width: usize },
    Blocked,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointIssue::OutOfBounds { height, width } => {
                write!(f, "outside the {}x{} grid", height, width)
            }
            EndpointIssue::Blocked => write!(f, "on a blocked cell"),
        }
    }
}

/// Errors raised before or during a search.
///
/// A search that simply finds no route is not an error; see
/// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).
#[derive(Debug, Error)]
pub enum Error {
    /// Start or goal is out of bounds or blocked.
    #[error("{endpoint} cell {cell} is {reason}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        cell: Cell,
        reason: EndpointIssue,
    },

    /// Movement rule or heuristic cannot guarantee a correct search.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Grid description is malformed.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
