//! Implements the V0 decoding of the chunk calldata into a [`Chunk`].

pub(crate) use block_context::decode_block_contexts;
mod block_context;

use super::constants::TRANSACTION_LENGTH_BYTES_SIZE;
use crate::{decoding::transaction::Transaction, error::DecodingError, Chunk, L2Block};

use alloy_primitives::bytes::Buf;

/// Decodes the chunk into a [`Chunk`], reading the L2 transactions following the block contexts.
pub fn decode_chunk(chunk: &[u8]) -> Result<Chunk, DecodingError> {
    let buf = &mut &*chunk;
    let contexts = decode_block_contexts(buf)?;

    // for each block context, decode the transactions
    let mut blocks = Vec::with_capacity(contexts.len());
    for context in contexts {
        let transactions_count = context.num_l2_transactions();
        let mut transactions = Vec::with_capacity(transactions_count);
        for _ in 0..transactions_count {
            if buf.remaining() < TRANSACTION_LENGTH_BYTES_SIZE {
                return Err(DecodingError::Eof)
            }
            let len = buf.get_u32() as usize;
            if buf.remaining() < len {
                return Err(DecodingError::Eof)
            }

            let tx_buf = &mut &buf[..len];
            let tx = Transaction::try_from_buf(tx_buf).ok_or(DecodingError::MalformedTransaction)?;
            if !tx_buf.is_empty() {
                return Err(DecodingError::MalformedTransaction)
            }
            buf.advance(len);
            transactions.push(tx.0);
        }
        blocks.push(L2Block::new(transactions, context))
    }

    Ok(Chunk::new(blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils::encode_chunk_v0, BlockContext};

    use alloy_primitives::{bytes, U256};

    #[test]
    fn test_should_decode_v0_chunk() -> eyre::Result<()> {
        let tx = bytes!("02c3010203");
        let first = BlockContext {
            number: 1,
            timestamp: 10,
            base_fee: U256::from(1),
            gas_limit: 10_000_000,
            num_transactions: 3,
            num_l1_messages: 2,
        };
        let second = BlockContext { number: 2, num_transactions: 0, ..first.clone() };
        let chunk = Chunk::new(vec![
            L2Block::new(vec![tx.clone()], first),
            L2Block::new(vec![], second),
        ]);

        let decoded = decode_chunk(&encode_chunk_v0(&chunk))?;
        assert_eq!(decoded, chunk);
        assert_eq!(decoded.num_l1_messages(), 4);

        Ok(())
    }

    #[test]
    fn test_should_reject_truncated_chunk() {
        assert!(matches!(decode_chunk(&[]), Err(DecodingError::EmptyChunk)));
        assert!(matches!(
            decode_chunk(&[2, 0, 0]),
            Err(DecodingError::ChunkTooShort { blocks: 2, len: 3 })
        ));

        // a block declaring one L2 transaction with no transaction data.
        let context = BlockContext { num_transactions: 1, ..Default::default() };
        let chunk = Chunk::new(vec![L2Block::new(vec![], context)]);
        assert!(matches!(decode_chunk(&encode_chunk_v0(&chunk)), Err(DecodingError::Eof)));
    }

    #[test]
    fn test_should_reject_l1_message_in_chunk() {
        let context = BlockContext { num_transactions: 1, ..Default::default() };
        let chunk = Chunk::new(vec![L2Block::new(vec![bytes!("7ec20102")], context)]);
        assert!(matches!(
            decode_chunk(&encode_chunk_v0(&chunk)),
            Err(DecodingError::MalformedTransaction)
        ));
    }
}
