//! A request-coalescing batcher for a cloud fleet-provisioning API.
//!
//! Many concurrent callers each ask for a handful of compute instances
//! matching a launch specification. Rather than issuing one remote
//! `CreateFleet`-style call per caller, this batcher groups callers whose
//! launch specifications are structurally equivalent (everything but the
//! requested capacity) into a single remote call for the sum of their
//! capacities, then fans the returned instance identifiers and per-item
//! errors back out to the original callers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fleet_batcher::{Batcher, FleetClient, FleetRequest, FleetResponse};
//! use tokio_util::sync::CancellationToken;
//!
//! struct Ec2Client; // wraps a real cloud SDK client in practice
//!
//! #[derive(Debug, Clone, thiserror::Error)]
//! #[error("fleet api call failed")]
//! struct Ec2Error;
//!
//! #[async_trait::async_trait]
//! impl FleetClient for Ec2Client {
//!     type Error = Ec2Error;
//!
//!     async fn create_fleet(&self, request: FleetRequest) -> Result<FleetResponse, Ec2Error> {
//!         todo!("call the real SDK with `request`")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let batcher = Batcher::new(Ec2Client);
//!     let request = FleetRequest::default();
//!     let response = batcher.submit(request, CancellationToken::new()).await;
//! }
//! ```

mod batcher;
mod bucket;
mod client;
mod dispatcher;
mod distributor;
mod error;
mod key;
mod model;
mod shared;

pub use batcher::{Batcher, BatcherBuilder};
pub use client::FleetClient;
pub use error::BatcherError;
pub use key::EquivalenceKey;
pub use model::{
    FleetError, FleetRequest, FleetResponse, LaunchTemplateAndOverrides, LaunchTemplateConfig,
    LaunchTemplateSpecification, Override, Reservation, TargetCapacity,
};
