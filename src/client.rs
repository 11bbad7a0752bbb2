//! The outward interface the batcher dispatches through.

use crate::model::{FleetRequest, FleetResponse};
use async_trait::async_trait;

/// The remote fleet-provisioning SDK call the batcher dispatches to.
///
/// Implementors wrap whatever cloud SDK client is actually in use. The
/// batcher never retries, rate-limits, or times out this call itself;
/// those are `Self`'s responsibility (e.g. via the context/cancellation
/// mechanism the concrete SDK already threads through).
///
/// A non-`Err` result with a non-empty [`FleetResponse::errors`] is *not*
/// a transport failure and must not be reported as `Err`. The batcher
/// distributes those per-item errors to every caller in the bucket instead.
#[async_trait]
pub trait FleetClient: Send + Sync + 'static {
    /// The transport error type. Cloned when fanning a single failure out
    /// to every caller sharing a bucket, so it must be cheap to clone.
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Issue one fleet request and return its response or a transport error.
    async fn create_fleet(&self, request: FleetRequest) -> Result<FleetResponse, Self::Error>;
}
