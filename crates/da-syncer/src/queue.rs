use crate::{DaSyncConfig, DaSyncError, DataSource, DataSourceFactory, SourceData};
use std::{collections::VecDeque, fmt::Debug, time::Duration};

use futures::Stream;
use rollup_node_primitives::DaEntry;

/// A continuous queue of [`DaEntry`], opening a new source on the factory each time the current
/// one is exhausted.
pub struct DaQueue<F: DataSourceFactory> {
    /// The factory for the sources.
    factory: F,
    /// The currently open source.
    source: Option<F::Source>,
    /// The entries yielded by the source and not yet consumed.
    buffer: VecDeque<DaEntry>,
    /// The L1 height the next source opens at.
    l1_height: u64,
    /// The interval between two polls of an exhausted L1 chain.
    poll_interval: Duration,
}

impl<F: DataSourceFactory + Debug> Debug for DaQueue<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaQueue")
            .field("factory", &self.factory)
            .field("source", &self.source.as_ref().map(|s| s.l1_height()))
            .field("buffer", &self.buffer)
            .field("l1_height", &self.l1_height)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl<F: DataSourceFactory> DaQueue<F> {
    /// Returns a new [`DaQueue`] starting at the configured L1 block.
    pub fn new(factory: F, config: &DaSyncConfig) -> Self {
        Self {
            factory,
            source: None,
            buffer: VecDeque::new(),
            l1_height: config.start_l1_block,
            poll_interval: config.poll_interval,
        }
    }

    /// Returns the next L1 height to be processed.
    pub fn l1_height(&self) -> u64 {
        self.source.as_ref().map_or(self.l1_height, DataSource::l1_height)
    }

    /// Returns the count of entries decoded but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the next entry, or [`None`] if the sources are exhausted. Errors are returned as
    /// is and leave the queue unchanged, the call can be retried.
    pub async fn try_next_da(&mut self) -> Result<Option<DaEntry>, DaSyncError> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry))
            }

            let source = self.source.get_or_insert_with(|| self.factory.open(self.l1_height));
            match source.next_data().await? {
                SourceData::Entries(entries) => self.buffer.extend(entries),
                SourceData::Exhausted => {
                    self.l1_height = source.l1_height();
                    self.source = None;
                    return Ok(None)
                }
            }
        }
    }

    /// Returns the next entry, waiting for new finalized L1 blocks when the sources are
    /// exhausted.
    pub async fn next_da(&mut self) -> Result<DaEntry, DaSyncError> {
        loop {
            if let Some(entry) = self.try_next_da().await? {
                return Ok(entry)
            }
            tracing::trace!(
                target: "scroll::da_syncer",
                l1_height = self.l1_height,
                "waiting for finalized blocks"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Converts the queue into a [`Stream`] of entries. Transient errors are yielded and the
    /// stream carries on, the stream ends after the first fatal error.
    pub fn into_stream(self) -> impl Stream<Item = Result<DaEntry, DaSyncError>> {
        futures::stream::unfold(Some(self), |queue| async move {
            let mut queue = queue?;
            let res = queue.next_da().await;
            let next = match &res {
                Err(err) if !err.is_transient() => None,
                _ => Some(queue),
            };
            Some((res, next))
        })
    }
}
