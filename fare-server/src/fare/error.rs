//! Fare calculation errors.

use crate::domain::RouteError;

/// Errors returned by a fare calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareError {
    /// The route is disconnected, revisits a station or leaves its lines
    #[error("invalid route")]
    InvalidRoute,

    /// Reference data lacks something a valid route needs.
    ///
    /// Retrying cannot help; the data must be fixed.
    #[error("reference data integrity fault: {0}")]
    ReferenceIntegrity(String),

    /// The route could not be built
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl FareError {
    pub(crate) fn integrity(message: impl Into<String>) -> Self {
        FareError::ReferenceIntegrity(message.into())
    }
}
