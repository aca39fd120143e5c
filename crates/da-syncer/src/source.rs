use crate::{dispatcher::decode_logs, DaSyncError, DaSyncerMetrics};
use std::time::Instant;

use rollup_node_primitives::DaEntry;
use rollup_node_providers::L1Provider;

/// The data yielded by a step of a [`DataSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceData {
    /// The entries decoded from the processed L1 block range, in log order. The list is empty if
    /// the range holds no rollup event.
    Entries(Vec<DaEntry>),
    /// The source reached the finalized L1 height.
    Exhausted,
}

/// An instance of the trait yields the [`DaEntry`] of successive L1 block ranges.
///
/// Dropping the future returned by [`DataSource::next_data`] before completion must leave the
/// source in the state it was before the call.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Box)]
pub trait DataSource: Send {
    /// Processes the next L1 block range.
    async fn next_data(&mut self) -> Result<SourceData, DaSyncError>;

    /// Returns the next L1 height to be processed by the source.
    fn l1_height(&self) -> u64;
}

/// A [`DataSource`] reading the commit data from the transactions calldata and blobs.
#[derive(Debug)]
pub struct CalldataBlobSource<P> {
    /// The L1 provider.
    provider: P,
    /// The next L1 height to process.
    l1_height: u64,
    /// The count of L1 blocks fetched per range.
    fetch_block_range: u64,
    /// The metrics of the syncer.
    metrics: DaSyncerMetrics,
}

impl<P> CalldataBlobSource<P> {
    /// Returns a new [`CalldataBlobSource`] starting at the provided L1 height.
    pub fn new(provider: P, l1_height: u64, fetch_block_range: u64) -> Self {
        Self::with_metrics(provider, l1_height, fetch_block_range, DaSyncerMetrics::default())
    }

    /// Returns a new [`CalldataBlobSource`] reporting to the provided metrics.
    pub const fn with_metrics(
        provider: P,
        l1_height: u64,
        fetch_block_range: u64,
        metrics: DaSyncerMetrics,
    ) -> Self {
        Self { provider, l1_height, fetch_block_range, metrics }
    }
}

impl<P: L1Provider> CalldataBlobSource<P> {
    /// Fetches and decodes the logs of the next range. The cursor is only advanced once the full
    /// range is decoded.
    #[tracing::instrument(
        target = "scroll::da_syncer",
        skip(self),
        fields(l1_height = self.l1_height)
    )]
    async fn process_next_range(&mut self) -> Result<SourceData, DaSyncError> {
        let finalized = self.provider.finalized_block_number().await?;
        let to = self
            .l1_height
            .saturating_add(self.fetch_block_range.saturating_sub(1))
            .min(finalized);
        if self.l1_height > to {
            tracing::trace!(target: "scroll::da_syncer", finalized, "source exhausted");
            return Ok(SourceData::Exhausted)
        }

        let start = Instant::now();
        let logs = self.provider.rollup_logs(self.l1_height, to).await?;
        let entries = decode_logs(&self.provider, &logs, &self.metrics).await?;

        tracing::debug!(
            target: "scroll::da_syncer",
            from = self.l1_height,
            to,
            entries = entries.len(),
            "processed range"
        );
        self.l1_height = to + 1;
        self.metrics.l1_height.set(self.l1_height as f64);
        self.metrics.range_duration.record(start.elapsed().as_secs_f64());

        Ok(SourceData::Entries(entries))
    }
}

#[async_trait::async_trait]
impl<P: L1Provider> DataSource for CalldataBlobSource<P> {
    async fn next_data(&mut self) -> Result<SourceData, DaSyncError> {
        let l1_height = self.l1_height;
        let res = self.process_next_range().await;
        if let Err(err) = &res {
            if err.is_transient() {
                tracing::warn!(
                    target: "scroll::da_syncer",
                    l1_height,
                    %err,
                    "failed to process range"
                );
            } else {
                tracing::error!(
                    target: "scroll::da_syncer",
                    l1_height,
                    %err,
                    "failed to process range"
                );
            }
        }
        res
    }

    fn l1_height(&self) -> u64 {
        self.l1_height
    }
}
