//! Splits a bucket's remote response across its pending callers.

use crate::bucket::PendingCall;
use crate::error::BatcherError;
use crate::model::FleetResponse;
use std::collections::VecDeque;

/// Deliver `result` to every [`PendingCall`] in `pending`, in submission
/// order.
///
/// A transport error is replicated verbatim to every caller. A successful
/// response is split: each caller is assigned `min(requested, remaining)`
/// instance identifiers taken from the front of the flattened instance
/// list, reshaped into a single synthetic reservation that copies the
/// first reservation's metadata. Every caller receives the same `fleet_id`
/// and the full `errors` list regardless of how many instances it was
/// allotted.
pub(crate) fn distribute<E>(pending: Vec<PendingCall<E>>, result: Result<FleetResponse, E>)
where
    E: std::error::Error + Clone + 'static,
{
    match result {
        Err(transport_err) => {
            for call in pending {
                let _ = call
                    .responder
                    .send(Err(BatcherError::Transport(transport_err.clone())));
            }
        }
        Ok(response) => distribute_success(pending, response),
    }
}

fn distribute_success<E>(pending: Vec<PendingCall<E>>, response: FleetResponse)
where
    E: std::error::Error + 'static,
{
    let metadata_template = response.instances.first().cloned();
    let mut remaining: VecDeque<String> = response
        .instances
        .into_iter()
        .flat_map(|reservation| reservation.instance_ids)
        .collect();

    for call in pending {
        let take = (call.requested_capacity as usize).min(remaining.len());
        let ids: Vec<String> = remaining.drain(..take).collect();

        let instances = if ids.is_empty() {
            Vec::new()
        } else {
            let mut reservation = metadata_template.clone().unwrap_or_default();
            reservation.instance_ids = ids;
            vec![reservation]
        };

        let per_caller = FleetResponse {
            fleet_id: response.fleet_id.clone(),
            instances,
            errors: response.errors.clone(),
        };

        let _ = call.responder.send(Ok(per_caller));
    }
}
