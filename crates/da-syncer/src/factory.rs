use crate::{CalldataBlobSource, DaSyncerMetrics, DataSource};

use rollup_node_providers::L1Provider;

/// An instance of the trait opens [`DataSource`]s at a L1 height.
#[auto_impl::auto_impl(&, Arc)]
pub trait DataSourceFactory: Send + Sync {
    /// The source opened by the factory.
    type Source: DataSource;

    /// Opens a source starting at the provided L1 height.
    fn open(&self, l1_height: u64) -> Self::Source;
}

/// A [`DataSourceFactory`] opening [`CalldataBlobSource`]s.
#[derive(Debug, Clone)]
pub struct CalldataBlobSourceFactory<P> {
    /// The L1 provider shared by the sources.
    provider: P,
    /// The count of L1 blocks fetched per range.
    fetch_block_range: u64,
    /// The metrics of the syncer.
    metrics: DaSyncerMetrics,
}

impl<P> CalldataBlobSourceFactory<P> {
    /// Returns a new [`CalldataBlobSourceFactory`].
    pub fn new(provider: P, fetch_block_range: u64) -> Self {
        Self { provider, fetch_block_range, metrics: DaSyncerMetrics::default() }
    }
}

impl<P: L1Provider + Clone> DataSourceFactory for CalldataBlobSourceFactory<P> {
    type Source = CalldataBlobSource<P>;

    fn open(&self, l1_height: u64) -> Self::Source {
        tracing::trace!(target: "scroll::da_syncer", l1_height, "opening calldata blob source");
        CalldataBlobSource::with_metrics(
            self.provider.clone(),
            l1_height,
            self.fetch_block_range,
            self.metrics.clone(),
        )
    }
}
