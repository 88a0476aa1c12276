//! Error types for the client subsystem.

use thiserror::Error;

/// Errors surfaced by the load-balanced execution path.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The load balancer found no instance backing the logical service name.
    #[error("no instance available for service `{service}`")]
    NoInstanceAvailable {
        /// Logical service name the request was addressed to.
        service: String,
    },

    /// The underlying transport failed to complete the exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be prepared for dispatch (bad URI, missing host).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A customizer failed while mutating a client instance.
    #[error("customizer failed: {0}")]
    Customize(String),
}

impl ClientError {
    /// Whether a retry policy may reasonably re-attempt after this error.
    ///
    /// Instance selection and transport failures are transient; a request that
    /// could not even be constructed will not improve on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::NoInstanceAvailable { .. } | ClientError::Transport(_)
        )
    }
}
