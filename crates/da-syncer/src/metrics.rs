use metrics::{Counter, Gauge, Histogram};
use metrics_derive::Metrics;

/// The metrics for the data availability syncer.
#[derive(Metrics, Clone)]
#[metrics(scope = "da_syncer")]
pub struct DaSyncerMetrics {
    /// A counter on the decoded commit batch entries.
    pub commit_batches: Counter,
    /// A counter on the decoded revert batch entries.
    pub revert_batches: Counter,
    /// A counter on the decoded finalize batch entries.
    pub finalize_batches: Counter,
    /// A counter on the L1 messages attached to the commit batch entries.
    pub l1_messages: Counter,
    /// The next L1 height to be processed by the source.
    pub l1_height: Gauge,
    /// The duration of the processing of a L1 block range.
    pub range_duration: Histogram,
}
