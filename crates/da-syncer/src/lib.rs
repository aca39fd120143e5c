//! A syncer rebuilding the stream of batch lifecycle events for Scroll from the L1 data
//! availability layer.
//!
//! The syncer reads the rollup contract logs over ranges of finalized L1 blocks, decodes the
//! committed batches from the transactions calldata and blobs, and attaches the L1 messages
//! included by each batch.

pub mod blob;

mod config;
pub use config::{DaSyncArgs, DaSyncConfig, DEFAULT_FETCH_BLOCK_RANGE, DEFAULT_POLL_INTERVAL_MS};

mod decoder;
pub use decoder::decode_commit_batch;

mod dispatcher;
pub use dispatcher::decode_logs;

mod error;
pub use error::DaSyncError;

mod factory;
pub use factory::{CalldataBlobSourceFactory, DataSourceFactory};

mod metrics;
pub use metrics::DaSyncerMetrics;

mod queue;
pub use queue::DaQueue;

mod source;
pub use source::{CalldataBlobSource, DataSource, SourceData};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use rollup_node_providers::L1Provider;

/// Returns a [`DaQueue`] opening [`CalldataBlobSource`]s on the provider.
pub fn da_queue<P: L1Provider + Clone>(
    provider: P,
    config: DaSyncConfig,
) -> DaQueue<CalldataBlobSourceFactory<P>> {
    DaQueue::new(CalldataBlobSourceFactory::new(provider, config.fetch_block_range), &config)
}
