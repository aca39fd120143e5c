use crate::{decoder::decode_commit_batch, DaSyncError, DaSyncerMetrics};

use alloy_primitives::ruint::UintTryTo;
use alloy_rpc_types_eth::Log;
use rollup_node_primitives::{CommitBatchDa, DaEntry, FinalizeBatchDa, RevertBatchDa};
use rollup_node_providers::L1Provider;
use scroll_l1::{CommitBatchArgs, CommitBatchCall, RollupEvent};

/// Decodes the rollup logs into a list of [`DaEntry`], one entry per log, in log order.
pub async fn decode_logs<P: L1Provider>(
    provider: &P,
    logs: &[Log],
    metrics: &DaSyncerMetrics,
) -> Result<Vec<DaEntry>, DaSyncError> {
    let mut entries = Vec::with_capacity(logs.len());
    for log in logs {
        entries.push(decode_log(provider, log).await?);
    }

    for entry in &entries {
        match entry {
            DaEntry::CommitBatch(commit) => {
                metrics.commit_batches.increment(1);
                metrics.l1_messages.increment(commit.l1_messages.len() as u64);
            }
            DaEntry::RevertBatch(_) => metrics.revert_batches.increment(1),
            DaEntry::FinalizeBatch(_) => metrics.finalize_batches.increment(1),
        }
    }

    Ok(entries)
}

/// Decodes a single rollup log into a [`DaEntry`].
async fn decode_log<P: L1Provider>(provider: &P, log: &Log) -> Result<DaEntry, DaSyncError> {
    let topic = log.topics().first().copied();
    let event = topic
        .as_ref()
        .and_then(RollupEvent::from_topic)
        .ok_or(DaSyncError::UnknownEvent { topic, tx_hash: log.transaction_hash })?;

    let batch_index = event
        .batch_index(&log.inner)
        .map_err(|error| DaSyncError::DecodeLog { event: event.name(), error })?;
    let batch_index: u64 =
        batch_index.uint_try_to().map_err(|_| DaSyncError::InvalidBatchIndex(batch_index))?;
    let l1_block_number = log.block_number.ok_or(DaSyncError::MissingLogField("block_number"))?;

    tracing::trace!(
        target: "scroll::da_syncer",
        event = event.name(),
        batch_index,
        l1_block_number,
        "decoding log"
    );

    let entry = match event {
        // skip any request for the genesis batch.
        RollupEvent::CommitBatch if batch_index == 0 => {
            CommitBatchDa::genesis(l1_block_number).into()
        }
        RollupEvent::CommitBatch => {
            let input = provider.transaction_input(log).await?;
            let args = CommitBatchArgs::from(CommitBatchCall::try_decode(&input)?);
            decode_commit_batch(provider, batch_index, args, log).await?.into()
        }
        RollupEvent::RevertBatch => RevertBatchDa { batch_index, l1_block_number }.into(),
        RollupEvent::FinalizeBatch => FinalizeBatchDa { batch_index, l1_block_number }.into(),
    };

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    use alloy_primitives::{Address, Bytes, LogData, B256};
    use rollup_node_providers::{
        test_utils::{rpc_log, ChainReaderCall},
        L1ChainReader,
    };
    use scroll_codec::{test_utils::encode_chunk_v0, BlockContext, Chunk, L2Block};

    fn v0_commit_input() -> Bytes {
        let chunk = Chunk::new(vec![L2Block::new(
            vec![],
            BlockContext {
                number: 1,
                num_transactions: 1,
                num_l1_messages: 1,
                ..Default::default()
            },
        )]);
        commit_batch_calldata(0, 0, vec![encode_chunk_v0(&chunk)], skipped_bitmap(1, &[]), false)
    }

    #[tokio::test]
    async fn test_should_decode_logs_in_order() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.insert_l1_messages(0..1);
        mock.commit_batch(10, 0, 1, v0_commit_input(), None);
        mock.revert_batch(10, 1, 1);
        mock.commit_batch(11, 2, 1, v0_commit_input(), None);
        mock.finalize_batch(12, 3, 1);

        let provider = mock.provider();
        let logs = provider.rollup_logs(0, 20).await?;
        let entries = decode_logs(&provider, &logs, &DaSyncerMetrics::default()).await?;

        let kinds = entries.iter().map(|e| (e.kind(), e.batch_index())).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [("commit", 1), ("revert", 1), ("commit", 1), ("finalize", 1)]
        );
        let blocks = entries.iter().map(DaEntry::l1_block_number).collect::<Vec<_>>();
        assert_eq!(blocks, [10, 10, 11, 12]);
        assert!(matches!(&entries[2], DaEntry::CommitBatch(c) if c.l1_messages.len() == 1));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_unknown_event() -> eyre::Result<()> {
        let mock = MockL1::default();
        let topic = B256::repeat_byte(0xab);
        let data = LogData::new_unchecked(vec![topic], Bytes::new());
        let log = rpc_log(alloy_primitives::Log { address: Address::ZERO, data }, 1, tx_hash(0));

        let res = decode_logs(&mock.provider(), &[log], &DaSyncerMetrics::default()).await;
        assert!(matches!(
            res,
            Err(DaSyncError::UnknownEvent { topic: Some(t), tx_hash: Some(h) })
                if t == topic && h == tx_hash(0)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_skip_requests_for_genesis() -> eyre::Result<()> {
        let mock = MockL1::default();
        let log = mock.commit_batch(1, 0, 0, Bytes::new(), None);
        mock.chain.fail_next(ChainReaderCall::TransactionInput, 1);

        let entries = decode_logs(&mock.provider(), &[log], &DaSyncerMetrics::default()).await?;

        assert_eq!(entries, [DaEntry::CommitBatch(CommitBatchDa::genesis(1))]);
        assert_eq!(mock.chain.transaction_requests(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_propagate_provider_failure() -> eyre::Result<()> {
        let mock = MockL1::default();
        let log = mock.commit_batch(1, 0, 3, v0_commit_input(), None);
        mock.chain.fail_next(ChainReaderCall::TransactionInput, 1);

        let res = decode_logs(&mock.provider(), &[log], &DaSyncerMetrics::default()).await;
        assert!(res.is_err_and(|err| err.is_transient()));

        Ok(())
    }
}
