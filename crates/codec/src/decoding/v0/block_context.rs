use crate::{error::DecodingError, from_be_bytes_slice_and_advance_buf, BlockContext};

use alloy_primitives::{bytes::Buf, U256};

impl BlockContext {
    /// Tries to read from the input buffer into the [`BlockContext`].
    /// Returns [`None`] if the buffer.len() < [`BlockContext::BYTES_LENGTH`].
    pub fn try_from_buf(buf: &mut &[u8]) -> Option<Self> {
        if buf.len() < Self::BYTES_LENGTH {
            return None
        }
        let number = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let timestamp = from_be_bytes_slice_and_advance_buf!(u64, buf);

        let base_fee = U256::from_be_slice(&buf[0..32]);
        buf.advance(32);

        let gas_limit = from_be_bytes_slice_and_advance_buf!(u64, buf);
        let num_transactions = from_be_bytes_slice_and_advance_buf!(u16, buf);
        let num_l1_messages = from_be_bytes_slice_and_advance_buf!(u16, buf);

        Some(Self { number, timestamp, base_fee, gas_limit, num_transactions, num_l1_messages })
    }
}

/// Reads the block count and the block contexts which start every chunk, for all codec versions.
pub(crate) fn decode_block_contexts(buf: &mut &[u8]) -> Result<Vec<BlockContext>, DecodingError> {
    let len = buf.len();
    let blocks = buf.first().copied().ok_or(DecodingError::EmptyChunk)? as usize;
    buf.advance(1);

    (0..blocks)
        .map(|_| {
            BlockContext::try_from_buf(buf).ok_or(DecodingError::ChunkTooShort { blocks, len })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decode_block_context() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u64.to_be_bytes());
        data.extend_from_slice(&1_700_000_000u64.to_be_bytes());
        data.extend_from_slice(&U256::from(10).to_be_bytes::<32>());
        data.extend_from_slice(&10_000_000u64.to_be_bytes());
        data.extend_from_slice(&5u16.to_be_bytes());
        data.extend_from_slice(&2u16.to_be_bytes());

        let buf = &mut data.as_slice();
        let context = BlockContext::try_from_buf(buf).expect("valid context");
        assert!(buf.is_empty());
        assert_eq!(
            context,
            BlockContext {
                number: 7,
                timestamp: 1_700_000_000,
                base_fee: U256::from(10),
                gas_limit: 10_000_000,
                num_transactions: 5,
                num_l1_messages: 2,
            }
        );
        assert_eq!(context.num_l2_transactions(), 3);
    }
}
