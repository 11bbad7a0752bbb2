//! The public entry point: [`Batcher`] and its [`BatcherBuilder`].

use crate::bucket::{BucketTable, PendingCall};
use crate::client::FleetClient;
use crate::dispatcher;
use crate::error::BatcherError;
use crate::key::EquivalenceKey;
use crate::model::{FleetRequest, FleetResponse};
use crate::shared::Shared;
use parking_lot::Mutex as SyncMutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default dispatch period.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A request-coalescing batcher in front of a [`FleetClient`].
///
/// Cheaply cloneable: clone it (or share it behind an `Arc`) to call
/// [`submit`](Self::submit) from many tasks concurrently. The background
/// dispatcher is spawned once, at construction, and keeps running until
/// [`shutdown`](Self::shutdown) is called or every clone (and the shared
/// state it holds) is dropped.
pub struct Batcher<C: FleetClient> {
    shared: Arc<Shared<C>>,
    dispatcher: Arc<SyncMutex<Option<JoinHandle<()>>>>,
}

impl<C: FleetClient> Clone for Batcher<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<C: FleetClient> Batcher<C> {
    /// Construct a batcher with the default tick interval (1 second).
    pub fn new(client: C) -> Self {
        Self::builder(client).build()
    }

    /// Start configuring a batcher with non-default settings.
    pub fn builder(client: C) -> BatcherBuilder<C> {
        BatcherBuilder::new(client)
    }

    /// Submit a request, coalescing it with any other pending request that
    /// has an equal [`EquivalenceKey`], and wait for the shared remote call
    /// to resolve.
    ///
    /// `cancel` is the caller's own cancellation scope: if it fires before
    /// a response is delivered, this returns [`BatcherError::Cancelled`]
    /// immediately, but the underlying `PendingCall` is *not* withdrawn.
    /// The dispatcher still counts this caller's capacity in the aggregate
    /// remote request. Pass [`CancellationToken::new()`] (a token that is
    /// never cancelled) if the caller has no cancellation scope of its own.
    ///
    /// Returns [`BatcherError::InvalidCapacity`] synchronously, before
    /// enqueuing anything, if `request.total_target_capacity() == 0`.
    pub async fn submit(
        &self,
        request: FleetRequest,
        cancel: CancellationToken,
    ) -> Result<FleetResponse, BatcherError<C::Error>> {
        let requested_capacity = request.total_target_capacity();
        if requested_capacity == 0 {
            return Err(BatcherError::InvalidCapacity);
        }

        let key = EquivalenceKey::compute(&request);
        let (responder, receiver) = oneshot::channel();
        let call = PendingCall {
            requested_capacity,
            responder,
        };

        let enqueued = {
            let mut buckets = self.shared.buckets.lock();
            buckets.insert(key, &request, call)
        };
        if enqueued.is_err() {
            return Err(BatcherError::ShuttingDown);
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(BatcherError::Cancelled),
            result = receiver => match result {
                Ok(response) => response,
                // The dispatcher dropped the sender without sending, which
                // only happens if the task itself panicked or was aborted.
                Err(_) => Err(BatcherError::ShuttingDown),
            },
        }
    }

    /// Signal the dispatcher to perform its final drain and stop.
    ///
    /// Waits for that drain to complete before returning, so every
    /// `PendingCall` still queued at the moment this is called is either
    /// dispatched for real or resolved with an error before `shutdown`
    /// returns. Safe to call more than once or from more than one clone.
    pub async fn shutdown(&self) {
        self.shared.shutdown.cancel();
        let handle = self.dispatcher.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// Builder for [`Batcher`], following the crate's usual `::builder()` /
/// `::build()` pattern for the one knob this component exposes.
#[must_use = "builders do nothing unless you call .build()"]
pub struct BatcherBuilder<C: FleetClient> {
    client: C,
    tick_interval: Duration,
}

impl<C: FleetClient> BatcherBuilder<C> {
    pub(crate) fn new(client: C) -> Self {
        Self {
            client,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Override the dispatch tick period. Mostly useful in tests that want
    /// a faster batching window than the 1-second default.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Build the batcher and spawn its dispatcher task.
    pub fn build(self) -> Batcher<C> {
        let shared = Arc::new(Shared {
            client: self.client,
            buckets: SyncMutex::new(BucketTable::default()),
            shutdown: CancellationToken::new(),
        });

        let dispatcher_shared = shared.clone();
        let tick_interval = self.tick_interval;
        debug!(?tick_interval, "starting fleet batcher dispatcher");
        let handle = tokio::spawn(async move {
            dispatcher::run(dispatcher_shared, tick_interval).await;
        });

        Batcher {
            shared,
            dispatcher: Arc::new(SyncMutex::new(Some(handle))),
        }
    }
}
