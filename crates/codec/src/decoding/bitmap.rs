use super::constants::{SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS, SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE};
use crate::error::DecodingError;

use alloy_primitives::U256;

/// The decoded skipped L1 messages bitmap of a batch.
///
/// The bitmap is a sequence of 32 bytes big-endian words, where bit `i % 256` of word `i / 256`
/// is set if the `i`-th L1 message popped by the batch was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkippedL1MessageBitmap(Vec<U256>);

impl SkippedL1MessageBitmap {
    /// Decodes the bitmap for a batch popping `total_l1_message_popped` L1 messages.
    pub fn decode(bitmap: &[u8], total_l1_message_popped: u64) -> Result<Self, DecodingError> {
        let invalid = || DecodingError::InvalidSkippedL1MessageBitmap {
            len: bitmap.len(),
            total: total_l1_message_popped,
        };

        if bitmap.len() % SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE != 0 {
            return Err(invalid())
        }
        let words = bitmap.len() / SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE;
        if words as u64 != total_l1_message_popped.div_ceil(SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS) {
            return Err(invalid())
        }

        Ok(Self(
            bitmap
                .chunks_exact(SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE)
                .map(U256::from_be_slice)
                .collect(),
        ))
    }

    /// Returns true if the L1 message at the provided offset in the batch was skipped.
    pub fn is_skipped(&self, offset: u64) -> bool {
        let word = (offset / SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS) as usize;
        let bit = (offset % SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS) as usize;
        self.0.get(word).is_some_and(|w| w.bit(bit))
    }
}
