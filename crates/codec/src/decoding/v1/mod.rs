//! Implements the V1 decoding: block contexts are read from the chunk calldata and the L2
//! transactions from the blob.

use super::{
    blob::canonical_bytes,
    constants::{BLOB_CHUNK_SIZE_BYTES_SIZE, BLOB_NUM_CHUNKS_BYTES_SIZE},
    transaction::Transaction,
    v0::decode_block_contexts,
};
use crate::{error::DecodingError, Chunk, L2Block};

use alloy_eips::eip4844::Blob;
use alloy_primitives::bytes::Buf;

/// The maximum count of chunks in a V1 batch.
pub const MAX_NUM_CHUNKS: usize = 15;

/// Decodes the chunk into a [`Chunk`] containing only the block contexts.
pub fn decode_chunk(chunk: &[u8]) -> Result<Chunk, DecodingError> {
    let contexts = decode_block_contexts(&mut &*chunk)?;
    Ok(Chunk::new(contexts.into_iter().map(|c| L2Block::new(Vec::new(), c)).collect()))
}

/// Decodes the L2 transactions from the blob into the blocks of the chunks.
pub fn decode_blob_transactions(blob: &Blob, chunks: &mut [Chunk]) -> Result<(), DecodingError> {
    decode_transactions_from_payload(&canonical_bytes(blob), chunks, MAX_NUM_CHUNKS)
}

/// Decodes the L2 transactions from the batch payload into the blocks of the chunks.
///
/// The payload is laid out as the chunk count (2 bytes), followed by `max_num_chunks` chunk sizes
/// (4 bytes each) and the concatenated RLP encoded transactions of each chunk.
pub(crate) fn decode_transactions_from_payload(
    payload: &[u8],
    chunks: &mut [Chunk],
    max_num_chunks: usize,
) -> Result<(), DecodingError> {
    let metadata_len = BLOB_NUM_CHUNKS_BYTES_SIZE + max_num_chunks * BLOB_CHUNK_SIZE_BYTES_SIZE;
    if payload.len() < metadata_len {
        return Err(DecodingError::Eof)
    }

    let buf = &mut &*payload;
    let num_chunks = buf.get_u16() as usize;
    if num_chunks > max_num_chunks {
        return Err(DecodingError::TooManyChunks(num_chunks, max_num_chunks))
    }
    if num_chunks != chunks.len() {
        return Err(DecodingError::ChunkCountMismatch {
            declared: num_chunks,
            expected: chunks.len(),
        })
    }
    let sizes = (0..max_num_chunks).map(|_| buf.get_u32() as usize).collect::<Vec<_>>();

    for (chunk, size) in chunks.iter_mut().zip(sizes) {
        if buf.remaining() < size {
            return Err(DecodingError::Eof)
        }
        let chunk_buf = &mut &buf[..size];
        for block in &mut chunk.blocks {
            let count = block.context.num_l2_transactions();
            block.transactions = (0..count)
                .map(|_| {
                    Transaction::try_from_buf(chunk_buf)
                        .map(|tx| tx.0)
                        .ok_or(DecodingError::MalformedTransaction)
                })
                .collect::<Result<_, _>>()?;
        }
        buf.advance(size);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{encode_blob_v1, encode_chunk_calldata},
        BlockContext,
    };

    use alloy_primitives::bytes;

    fn chunks() -> Vec<Chunk> {
        let context = |number, num_transactions, num_l1_messages| BlockContext {
            number,
            num_transactions,
            num_l1_messages,
            ..Default::default()
        };
        vec![
            Chunk::new(vec![
                L2Block::new(vec![bytes!("c3010203"), bytes!("02c20405")], context(1, 3, 1)),
                L2Block::new(vec![], context(2, 0, 0)),
            ]),
            Chunk::new(vec![L2Block::new(vec![bytes!("01c106")], context(3, 1, 0))]),
        ]
    }

    #[test]
    fn test_should_decode_v1_blob_transactions() -> eyre::Result<()> {
        let expected = chunks();
        let mut decoded = expected
            .iter()
            .map(|chunk| decode_chunk(&encode_chunk_calldata(chunk)))
            .collect::<Result<Vec<_>, _>>()?;
        assert!(decoded.iter().flat_map(|c| &c.blocks).all(|b| b.transactions.is_empty()));

        let blob = encode_blob_v1(&expected)?;
        decode_blob_transactions(&blob, &mut decoded)?;
        assert_eq!(decoded, expected);

        Ok(())
    }

    #[test]
    fn test_should_reject_chunk_count_mismatch() -> eyre::Result<()> {
        let blob = encode_blob_v1(&chunks())?;
        let mut decoded = vec![decode_chunk(&encode_chunk_calldata(&chunks()[0]))?];

        assert!(matches!(
            decode_blob_transactions(&blob, &mut decoded),
            Err(DecodingError::ChunkCountMismatch { declared: 2, expected: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_should_reject_missing_transactions() -> eyre::Result<()> {
        let mut expected = chunks();
        let blob = encode_blob_v1(&expected)?;

        // the blob holds one transaction less than declared by the context.
        expected[1].blocks[0].context.num_transactions = 2;
        assert!(matches!(
            decode_blob_transactions(&blob, &mut expected),
            Err(DecodingError::MalformedTransaction)
        ));
        Ok(())
    }
}
