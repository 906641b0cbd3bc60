//! Route construction errors.
//!
//! These are caller errors raised while building or parsing a route. They
//! are distinct from fare calculation failures, see
//! [`FareError`](crate::fare::FareError).

/// Errors raised while building a route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Appending to a route that has no origin
    #[error("route is empty: begin it at a station first")]
    EmptyRoute,

    /// Appending an explicit segment while the route is still open at its origin
    #[error("cannot append an explicit segment while the route is open at its origin")]
    AppendConflict,

    /// Station name not known to the reference data
    #[error("unknown station {0:?}")]
    UnknownStation(String),

    /// Line name not known to the reference data
    #[error("unknown line {0:?}")]
    UnknownLine(String),

    /// Route text is not `Origin,Line,Station[,Line,Station...]`
    #[error("malformed route: {0}")]
    Malformed(&'static str),
}
