//! A scripted, in-memory stand-in for the cloud SDK's fleet client: callers
//! queue up the response (or error) the next call should get, and the fake
//! records every request it was invoked with for later assertions.

use async_trait::async_trait;
use fleet_batcher::{FleetClient, FleetRequest, FleetResponse, Reservation};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("fake transport error: {0}")]
pub struct FakeTransportError(pub String);

#[derive(Default)]
pub struct FakeFleetClient {
    calls: Mutex<Vec<FleetRequest>>,
    scripted: Mutex<VecDeque<Result<FleetResponse, FakeTransportError>>>,
}

impl FakeFleetClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result the next `create_fleet` call should return. Calls
    /// beyond the scripted queue get an auto-generated response with one
    /// freshly minted instance id per unit of requested capacity.
    pub fn push_response(&self, response: Result<FleetResponse, FakeTransportError>) {
        self.scripted.lock().unwrap().push_back(response);
    }

    /// Every request this fake was invoked with, in call order.
    pub fn calls(&self) -> Vec<FleetRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FleetClient for std::sync::Arc<FakeFleetClient> {
    type Error = FakeTransportError;

    async fn create_fleet(&self, request: FleetRequest) -> Result<FleetResponse, FakeTransportError> {
        self.calls.lock().unwrap().push(request.clone());

        if let Some(scripted) = self.scripted.lock().unwrap().pop_front() {
            return scripted;
        }

        let capacity = request.total_target_capacity() as usize;
        let instance_ids = (0..capacity).map(|i| format!("id-{i}")).collect();
        Ok(FleetResponse {
            fleet_id: "fake-fleet".to_string(),
            instances: vec![Reservation {
                instance_ids,
                ..Default::default()
            }],
            errors: Vec::new(),
        })
    }
}
