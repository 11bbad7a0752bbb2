//! The background task that drains buckets once per tick and dispatches
//! one remote call per bucket.

use crate::bucket::Bucket;
use crate::client::FleetClient;
use crate::distributor::distribute;
use crate::key::EquivalenceKey;
use crate::shared::Shared;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Runs until `shared.shutdown` fires, then performs one final drain before
/// returning so no in-flight caller is stranded.
pub(crate) async fn run<C: FleetClient>(shared: Arc<Shared<C>>, tick_interval: Duration) {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; consume it so the first real batch
    // isn't drained before any caller has had a chance to submit.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let batch = shared.buckets.lock().swap();
                dispatch_batch(&shared.client, batch).await;
            }
            _ = shared.shutdown.cancelled() => {
                let batch = shared.buckets.lock().close();
                debug!(bucket_count = batch.len(), "final drain on shutdown");
                dispatch_batch(&shared.client, batch).await;
                return;
            }
        }
    }
}

async fn dispatch_batch<C: FleetClient>(
    client: &C,
    batch: HashMap<EquivalenceKey, Bucket<C::Error>>,
) {
    if batch.is_empty() {
        return;
    }
    debug!(bucket_count = batch.len(), "dispatching tick");
    let dispatches = batch.into_values().map(|bucket| dispatch_one(client, bucket));
    futures::future::join_all(dispatches).await;
}

async fn dispatch_one<C: FleetClient>(client: &C, bucket: Bucket<C::Error>) {
    let total_capacity: u64 = bucket
        .pending
        .iter()
        .map(|call| call.requested_capacity)
        .sum();
    let request = bucket.canonical_request.with_total_target_capacity(total_capacity);

    debug!(total_capacity, callers = bucket.pending.len(), "issuing fleet request");
    let result = client.create_fleet(request).await;
    if let Err(ref err) = result {
        warn!(%err, "fleet request failed, propagating transport error to bucket");
    }
    distribute(bucket.pending, result);
}
