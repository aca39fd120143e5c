use crate::{error::DecodingError, from_be_bytes_slice_and_advance_buf};

/// The offset of the total L1 messages popped field: version (1 byte) and batch index (8 bytes)
/// followed by the L1 messages popped in the batch (8 bytes).
const TOTAL_L1_MESSAGE_POPPED_OFFSET: usize = 17;

/// Reads the total count of L1 messages popped before and including the batch, from the encoded
/// batch header.
pub fn total_l1_message_popped(header: &[u8]) -> Result<u64, DecodingError> {
    if header.len() < TOTAL_L1_MESSAGE_POPPED_OFFSET + 8 {
        return Err(DecodingError::InvalidParentHeaderLength(header.len()))
    }
    let buf = &mut &header[TOTAL_L1_MESSAGE_POPPED_OFFSET..];
    Ok(from_be_bytes_slice_and_advance_buf!(u64, buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_read_total_l1_message_popped() -> eyre::Result<()> {
        let mut header = vec![0u8; 89];
        header[0] = 1;
        header[9..17].copy_from_slice(&3u64.to_be_bytes());
        header[17..25].copy_from_slice(&1_234u64.to_be_bytes());

        assert_eq!(total_l1_message_popped(&header)?, 1_234);
        Ok(())
    }

    #[test]
    fn test_should_reject_short_header() {
        assert!(matches!(
            total_l1_message_popped(&[0u8; 24]),
            Err(DecodingError::InvalidParentHeaderLength(24))
        ));
    }
}
