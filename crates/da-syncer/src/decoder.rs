use crate::{blob::verify_blob, DaSyncError};
use std::sync::Arc;

use alloy_eips::eip4844::Blob;
use alloy_rpc_types_eth::Log;
use rollup_node_primitives::CommitBatchDa;
use rollup_node_providers::L1Provider;
use scroll_alloy_consensus::TxL1Message;
use scroll_codec::{
    decoding::{batch_header::total_l1_message_popped, bitmap::SkippedL1MessageBitmap},
    Chunk, Codec, DecodingError,
};
use scroll_l1::CommitBatchArgs;

/// Decodes the commit batch call emitted with the log into a [`CommitBatchDa`], fetching the blob
/// and the L1 messages of the batch from the provider.
///
/// The genesis batch short-circuits to an empty commit without any request to the provider.
pub async fn decode_commit_batch<P: L1Provider>(
    provider: &P,
    batch_index: u64,
    args: CommitBatchArgs,
    log: &Log,
) -> Result<CommitBatchDa, DaSyncError> {
    let l1_block_number = log.block_number.ok_or(DaSyncError::MissingLogField("block_number"))?;
    if batch_index == 0 {
        return Ok(CommitBatchDa::genesis(l1_block_number))
    }

    let codec = Codec::try_from(args.version)?;
    let mut chunks = codec.decode_chunks(&args.chunks)?;

    // the L1 messages window of the batch.
    let parent_total_l1_message_popped = total_l1_message_popped(&args.parent_batch_header)?;
    let total_l1_message_popped = chunks.iter().map(Chunk::num_l1_messages).sum::<u64>();
    if parent_total_l1_message_popped.checked_add(total_l1_message_popped).is_none() {
        return Err(DecodingError::L1MessageQueueOverflow {
            parent: parent_total_l1_message_popped,
            total: total_l1_message_popped,
        }
        .into())
    }
    let bitmap =
        SkippedL1MessageBitmap::decode(&args.skipped_l1_message_bitmap, total_l1_message_popped)?;

    if codec.uses_blob() {
        let blob = fetch_verified_blob(provider, batch_index, log, l1_block_number).await?;
        codec.decode_blob_transactions(&blob, &mut chunks)?;
    }

    let l1_messages = collect_l1_messages(
        provider,
        parent_total_l1_message_popped,
        total_l1_message_popped,
        &bitmap,
    )
    .await?;

    tracing::trace!(
        target: "scroll::da_syncer",
        batch_index,
        %codec,
        chunks = chunks.len(),
        l1_messages = l1_messages.len(),
        "decoded commit batch"
    );

    Ok(CommitBatchDa {
        version: args.version,
        batch_index,
        parent_total_l1_message_popped,
        skipped_l1_message_bitmap: args.skipped_l1_message_bitmap,
        chunks,
        l1_messages,
        l1_block_number,
    })
}

/// Fetches the blob of the commit transaction and verifies it against the transaction's blob
/// versioned hash.
async fn fetch_verified_blob<P: L1Provider>(
    provider: &P,
    batch_index: u64,
    log: &Log,
    l1_block_number: u64,
) -> Result<Arc<Blob>, DaSyncError> {
    let hash = provider.transaction_blob_versioned_hash(log).await?;
    let block_timestamp = match log.block_timestamp {
        Some(timestamp) => timestamp,
        None => provider.block_timestamp(l1_block_number).await?,
    };

    let blob = provider
        .blob(block_timestamp, hash)
        .await?
        .ok_or(DaSyncError::MissingBlob { batch_index, hash })?;
    verify_blob(&blob, hash)?;

    Ok(blob)
}

/// Returns the non skipped L1 messages in the `[parent_total, parent_total + total)` queue index
/// window, walking the window one slot at a time. The window end must fit in a `u64`.
async fn collect_l1_messages<P: L1Provider>(
    provider: &P,
    parent_total: u64,
    total: u64,
    bitmap: &SkippedL1MessageBitmap,
) -> Result<Vec<TxL1Message>, DaSyncError> {
    let mut messages = Vec::new();
    for offset in 0..total {
        if bitmap.is_skipped(offset) {
            continue
        }

        let queue_index = parent_total + offset;
        let message = provider
            .l1_message(queue_index)
            .await?
            .ok_or(DaSyncError::MissingL1Message(queue_index))?;
        if message.queue_index != queue_index {
            return Err(DaSyncError::L1MessageIndexMismatch {
                expected: queue_index,
                got: message.queue_index,
            })
        }
        messages.push(message);
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{blob::compute_blob_versioned_hash, test_utils::*};

    use alloy_primitives::{bytes, Bytes, B256};
    use rollup_node_providers::{
        test_utils::MockTransaction, FullL1Provider, L1MessageProvider, L1ProviderError,
    };
    use scroll_codec::{
        test_utils::{encode_blob_v1, encode_blob_v2, encode_chunk_calldata, encode_chunk_v0},
        BlockContext, CodecError, DecodingError, L2Block,
    };
    use scroll_l1::CommitBatchCall;

    fn context(number: u64, num_transactions: u16, num_l1_messages: u16) -> BlockContext {
        BlockContext {
            number,
            timestamp: 1_700_000_000 + number,
            gas_limit: 10_000_000,
            num_transactions,
            num_l1_messages,
            ..Default::default()
        }
    }

    /// A chunk with 3 L1 messages and one L2 transaction.
    fn chunk_with_l1_messages() -> Chunk {
        Chunk::new(vec![
            L2Block::new(vec![bytes!("02c3010203")], context(1, 3, 2)),
            L2Block::new(vec![], context(2, 1, 1)),
        ])
    }

    /// Chunks with L2 transactions only.
    fn blob_chunks() -> Vec<Chunk> {
        vec![
            Chunk::new(vec![
                L2Block::new(vec![bytes!("c3010203"), bytes!("02c20405")], context(1, 2, 0)),
                L2Block::new(vec![bytes!("01c106")], context(2, 1, 0)),
            ]),
            Chunk::new(vec![L2Block::new(vec![bytes!("c180")], context(3, 1, 0))]),
        ]
    }

    fn args(input: &Bytes) -> eyre::Result<CommitBatchArgs> {
        Ok(CommitBatchCall::try_decode(input)?.into())
    }

    #[tokio::test]
    async fn test_should_decode_v0_commit_batch() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.insert_l1_messages(10..13);
        let chunk = chunk_with_l1_messages();
        let input = commit_batch_calldata(
            0,
            10,
            vec![encode_chunk_v0(&chunk)],
            skipped_bitmap(3, &[1]),
            false,
        );
        let log = mock.commit_batch(100, 0, 5, input.clone(), None);

        let commit = decode_commit_batch(&mock.provider(), 5, args(&input)?, &log).await?;

        assert_eq!(commit.version, 0);
        assert_eq!(commit.batch_index, 5);
        assert_eq!(commit.l1_block_number, 100);
        assert_eq!(commit.parent_total_l1_message_popped, 10);
        assert_eq!(commit.chunks, vec![chunk]);
        assert_eq!(commit.l1_messages.iter().map(|m| m.queue_index).collect::<Vec<_>>(), [10, 12]);
        assert_eq!(commit.total_l1_message_popped(), Some(13));

        // v0 batches don't touch the blob provider.
        assert!(mock.blobs.requests().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_on_missing_l1_message() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.insert_l1_messages(10..11);
        mock.insert_l1_messages(12..13);
        let input = commit_batch_calldata(
            0,
            10,
            vec![encode_chunk_v0(&chunk_with_l1_messages())],
            skipped_bitmap(3, &[]),
            false,
        );
        let log = mock.commit_batch(100, 0, 5, input.clone(), None);

        let res = decode_commit_batch(&mock.provider(), 5, args(&input)?, &log).await;
        assert!(matches!(res, Err(DaSyncError::MissingL1Message(11))));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_return_genesis_without_requests() -> eyre::Result<()> {
        let mock = MockL1::default();
        let input =
            commit_batch_calldata(2, 0, vec![Bytes::from_static(&[0xff])], Bytes::new(), true);
        let log = mock.commit_batch(1, 0, 0, input.clone(), None);

        let commit = decode_commit_batch(&mock.provider(), 0, args(&input)?, &log).await?;
        assert_eq!(commit, CommitBatchDa::genesis(1));
        assert_eq!(mock.chain.transaction_requests(), 0);
        assert!(mock.messages.requests().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_decode_v1_commit_batch() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.chain.insert_block_timestamp(200, 1_700_000_123);
        let chunks = blob_chunks();
        let blob = encode_blob_v1(&chunks)?;
        let input = commit_batch_calldata(
            1,
            0,
            chunks.iter().map(encode_chunk_calldata).collect(),
            Bytes::new(),
            false,
        );
        let log = mock.commit_batch(200, 0, 7, input.clone(), Some(blob));

        let commit = decode_commit_batch(&mock.provider(), 7, args(&input)?, &log).await?;

        assert_eq!(commit.version, 1);
        assert_eq!(commit.chunks, chunks);
        assert!(commit.l1_messages.is_empty());
        // the blob is located with the timestamp of the commit block.
        let hash = compute_blob_versioned_hash(&blob)?;
        assert_eq!(mock.blobs.requests(), [(1_700_000_123, hash)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_decode_v2_commit_batch_with_log_timestamp() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.insert_l1_messages(3..5);
        let mut chunks = blob_chunks();
        chunks[1].blocks[0].context.num_transactions = 3;
        chunks[1].blocks[0].context.num_l1_messages = 2;
        let blob = encode_blob_v2(&chunks)?;
        let input = commit_batch_calldata(
            2,
            3,
            chunks.iter().map(encode_chunk_calldata).collect(),
            skipped_bitmap(2, &[]),
            true,
        );
        let mut log = mock.commit_batch(300, 0, 8, input.clone(), Some(blob));
        log.block_timestamp = Some(1_700_000_456);

        let commit = decode_commit_batch(&mock.provider(), 8, args(&input)?, &log).await?;

        assert_eq!(commit.version, 2);
        assert_eq!(commit.chunks, chunks);
        assert_eq!(commit.l1_messages.iter().map(|m| m.queue_index).collect::<Vec<_>>(), [3, 4]);
        assert_eq!(mock.blobs.requests()[0].0, 1_700_000_456);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_tampered_blob() -> eyre::Result<()> {
        let chunks = blob_chunks();
        for (version, blob) in [(1, encode_blob_v1(&chunks)?), (2, encode_blob_v2(&chunks)?)] {
            let mock = MockL1::default();
            mock.chain.insert_block_timestamp(200, 1_700_000_123);
            let input = commit_batch_calldata(
                version,
                0,
                chunks.iter().map(encode_chunk_calldata).collect(),
                Bytes::new(),
                version == 2,
            );
            let log = mock.commit_batch(200, 0, 7, input.clone(), Some(blob));

            // serve another blob under the committed versioned hash.
            let hash = compute_blob_versioned_hash(&blob)?;
            let mut tampered = blob;
            tampered[1] ^= 0x01;
            mock.blobs.insert(hash, tampered);

            let res = decode_commit_batch(&mock.provider(), 7, args(&input)?, &log).await;
            assert!(
                matches!(
                    res,
                    Err(DaSyncError::BlobHashMismatch { expected, .. }) if expected == hash
                ),
                "v{version}: {res:?}"
            );
            assert!(mock.messages.requests().is_empty());
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_on_missing_blob() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.chain.insert_block_timestamp(200, 1_700_000_123);
        let chunks = blob_chunks();
        let input = commit_batch_calldata(
            1,
            0,
            chunks.iter().map(encode_chunk_calldata).collect(),
            Bytes::new(),
            false,
        );
        let log = mock.commit_batch(200, 0, 7, input.clone(), None);
        let hash = B256::repeat_byte(0x01);
        mock.chain.insert_transaction(
            tx_hash(0),
            MockTransaction { input: input.clone(), blob_versioned_hash: Some(hash) },
        );

        let res = decode_commit_batch(&mock.provider(), 7, args(&input)?, &log).await;
        assert!(matches!(
            res,
            Err(DaSyncError::MissingBlob { batch_index: 7, hash: h }) if h == hash
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_invalid_commit_data() -> eyre::Result<()> {
        let mock = MockL1::default();
        let chunk = encode_chunk_v0(&chunk_with_l1_messages());

        // unsupported version.
        let input = commit_batch_calldata(3, 0, vec![chunk.clone()], Bytes::new(), false);
        let log = mock.commit_batch(1, 0, 1, input.clone(), None);
        let res = decode_commit_batch(&mock.provider(), 1, args(&input)?, &log).await;
        assert!(matches!(
            res,
            Err(DaSyncError::Codec(CodecError::Decoding(DecodingError::UnsupportedCodecVersion(
                3
            ))))
        ));

        // bitmap shorter than the l1 messages window.
        let input = commit_batch_calldata(0, 0, vec![chunk], Bytes::new(), false);
        let log = mock.commit_batch(1, 1, 1, input.clone(), None);
        let res = decode_commit_batch(&mock.provider(), 1, args(&input)?, &log).await;
        assert!(matches!(
            res,
            Err(DaSyncError::Codec(CodecError::Decoding(
                DecodingError::InvalidSkippedL1MessageBitmap { len: 0, total: 3 }
            )))
        ));
        assert!(mock.messages.requests().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_reject_l1_message_queue_overflow() -> eyre::Result<()> {
        let mock = MockL1::default();
        let input = commit_batch_calldata(
            0,
            u64::MAX - 1,
            vec![encode_chunk_v0(&chunk_with_l1_messages())],
            skipped_bitmap(3, &[]),
            false,
        );
        let log = mock.commit_batch(1, 0, 1, input.clone(), None);

        let res = decode_commit_batch(&mock.provider(), 1, args(&input)?, &log).await;
        assert!(matches!(
            res,
            Err(DaSyncError::Codec(CodecError::Decoding(
                DecodingError::L1MessageQueueOverflow { parent, total: 3 }
            ))) if parent == u64::MAX - 1
        ));
        assert!(mock.messages.requests().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_propagate_l1_message_provider_failure() -> eyre::Result<()> {
        let mock = MockL1::default();
        mock.insert_l1_messages(0..3);
        let input = commit_batch_calldata(
            0,
            0,
            vec![encode_chunk_v0(&chunk_with_l1_messages())],
            skipped_bitmap(3, &[]),
            false,
        );
        let log = mock.commit_batch(1, 0, 1, input.clone(), None);
        mock.messages.fail_next(1);

        let res = decode_commit_batch(&mock.provider(), 1, args(&input)?, &log).await;
        assert!(matches!(&res, Err(err @ DaSyncError::L1Provider(_)) if err.is_transient()));

        // the store recovers.
        let commit = decode_commit_batch(&mock.provider(), 1, args(&input)?, &log).await?;
        assert_eq!(commit.l1_messages.len(), 3);

        Ok(())
    }

    /// A message store answering with the message following the requested one.
    #[derive(Debug)]
    struct ShiftedMessages;

    #[async_trait::async_trait]
    impl L1MessageProvider for ShiftedMessages {
        async fn l1_message(
            &self,
            queue_index: u64,
        ) -> Result<Option<TxL1Message>, L1ProviderError> {
            Ok(Some(l1_message(queue_index + 1)))
        }
    }

    #[tokio::test]
    async fn test_should_reject_l1_message_index_mismatch() -> eyre::Result<()> {
        let mock = MockL1::default();
        let input = commit_batch_calldata(
            0,
            4,
            vec![encode_chunk_v0(&chunk_with_l1_messages())],
            skipped_bitmap(3, &[0]),
            false,
        );
        let log = mock.commit_batch(1, 0, 1, input.clone(), None);
        let provider = FullL1Provider::new(mock.chain.clone(), ShiftedMessages, mock.blobs.clone());

        let res = decode_commit_batch(&provider, 1, args(&input)?, &log).await;
        assert!(matches!(res, Err(DaSyncError::L1MessageIndexMismatch { expected: 5, got: 6 })));

        Ok(())
    }
}
