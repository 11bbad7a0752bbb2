//! Error types returned by [`Batcher::submit`](crate::Batcher::submit).

use thiserror::Error;

/// Errors `submit` can return.
///
/// `Transport` wraps whatever error type the caller's [`FleetClient`](crate::FleetClient)
/// implementation uses; it is cloned so that every caller sharing a bucket
/// can receive an independent copy of the same underlying failure.
#[derive(Debug, Error)]
pub enum BatcherError<E>
where
    E: std::error::Error + 'static,
{
    /// The request's `total_target_capacity` was less than 1.
    #[error("invalid fleet request: total target capacity must be at least 1")]
    InvalidCapacity,

    /// The caller's own cancellation scope fired before a response arrived.
    ///
    /// The caller's `PendingCall` is not removed from its bucket: the
    /// dispatcher still issues the aggregate remote call with this caller's
    /// capacity included, it just no longer has anyone listening for the
    /// result.
    #[error("submit was cancelled before a response was delivered")]
    Cancelled,

    /// The batcher shut down before this call's bucket was dispatched, or
    /// the in-flight call was stranded by the final drain.
    #[error("batcher is shutting down")]
    ShuttingDown,

    /// The remote fleet API call itself failed (a transport error, as
    /// opposed to a per-item [`FleetError`](crate::FleetError) inside a
    /// successful response).
    #[error("fleet client request failed: {0}")]
    Transport(#[source] E),
}

impl<E> Clone for BatcherError<E>
where
    E: std::error::Error + Clone + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Self::InvalidCapacity => Self::InvalidCapacity,
            Self::Cancelled => Self::Cancelled,
            Self::ShuttingDown => Self::ShuttingDown,
            Self::Transport(err) => Self::Transport(err.clone()),
        }
    }
}
