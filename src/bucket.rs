//! Transient intake-side state: buckets and pending calls.

use crate::error::BatcherError;
use crate::key::EquivalenceKey;
use crate::model::{FleetRequest, FleetResponse};
use std::collections::HashMap;
use tokio::sync::oneshot;

/// One caller's stake in a bucket: how much capacity it asked for, and
/// where to deliver its eventual response.
///
/// `responder` is a single-shot, single-slot channel. Sending never
/// blocks, and sending into a channel whose receiver was already dropped
/// (the caller cancelled) is simply ignored.
pub(crate) struct PendingCall<E>
where
    E: std::error::Error + 'static,
{
    pub(crate) requested_capacity: u64,
    pub(crate) responder: oneshot::Sender<Result<FleetResponse, BatcherError<E>>>,
}

/// All callers that share one [`EquivalenceKey`] within a tick window.
pub(crate) struct Bucket<E>
where
    E: std::error::Error + 'static,
{
    pub(crate) canonical_request: FleetRequest,
    pub(crate) pending: Vec<PendingCall<E>>,
}

impl<E> Bucket<E>
where
    E: std::error::Error + 'static,
{
    fn new(canonical_request: FleetRequest) -> Self {
        Self {
            canonical_request,
            pending: Vec::new(),
        }
    }
}

/// The intake-side state shared between `submit` and the dispatcher.
///
/// Both operations on this table are guarded by the same mutex: inserting a
/// [`PendingCall`] (possibly creating its bucket) and swapping the whole
/// table out for dispatch. `closed` is flipped under the same lock as the
/// final drain's swap so that a `submit` racing shutdown either lands in
/// the batch the final drain takes, or is rejected outright: it can never
/// land in a bucket that nothing will ever dispatch.
pub(crate) struct BucketTable<E>
where
    E: std::error::Error + 'static,
{
    buckets: HashMap<EquivalenceKey, Bucket<E>>,
    closed: bool,
}

impl<E> Default for BucketTable<E>
where
    E: std::error::Error + 'static,
{
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            closed: false,
        }
    }
}

impl<E> BucketTable<E>
where
    E: std::error::Error + 'static,
{
    /// Insert `call` into the bucket for `key`, creating it from
    /// `canonical_request` if this is the first caller with this key.
    ///
    /// Returns `Err(call)` without mutating the table if the table has
    /// already been closed for shutdown, handing the call back so the
    /// caller can be told `ShuttingDown` without ever having been enqueued.
    pub(crate) fn insert(
        &mut self,
        key: EquivalenceKey,
        canonical_request: &FleetRequest,
        call: PendingCall<E>,
    ) -> Result<(), PendingCall<E>> {
        if self.closed {
            return Err(call);
        }
        self.buckets
            .entry(key)
            .or_insert_with(|| Bucket::new(canonical_request.clone()))
            .pending
            .push(call);
        Ok(())
    }

    /// Atomically swap out every bucket currently queued, leaving an empty
    /// table behind. This is the "batch" a tick dispatches.
    pub(crate) fn swap(&mut self) -> HashMap<EquivalenceKey, Bucket<E>> {
        std::mem::take(&mut self.buckets)
    }

    /// Swap out the final batch and mark the table closed so no further
    /// `submit` can enqueue into a bucket nothing will ever drain.
    pub(crate) fn close(&mut self) -> HashMap<EquivalenceKey, Bucket<E>> {
        self.closed = true;
        std::mem::take(&mut self.buckets)
    }
}
