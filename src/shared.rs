//! State shared between `submit` callers and the dispatcher task.

use crate::bucket::BucketTable;
use crate::client::FleetClient;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) struct Shared<C: FleetClient> {
    pub(crate) client: C,
    pub(crate) buckets: Mutex<BucketTable<C::Error>>,
    pub(crate) shutdown: CancellationToken,
}
