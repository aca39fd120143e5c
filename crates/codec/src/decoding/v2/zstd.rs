//! ZSTD helpers.

use crate::error::DecodingError;

use alloy_eips::eip4844::USABLE_BYTES_PER_BLOB;
use ::zstd::zstd_safe::{get_error_name, DCtx, InBuffer, OutBuffer};

/// The ZSTD magic number for zstd compressed data header.
const ZSTD_MAGIC_NUMBER: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Uncompress the provided data, which is a zstd frame stripped of its magic number. Bytes
/// trailing the frame are ignored.
pub fn decompress_blob_data(data: &[u8]) -> Result<Vec<u8>, DecodingError> {
    let mut input = ZSTD_MAGIC_NUMBER.to_vec();
    input.extend_from_slice(data);
    // a capacity of twice the useful bytes per blob is a rough estimation of the amount of decoded
    // data.
    let mut output = Vec::with_capacity(2 * USABLE_BYTES_PER_BLOB);

    let mut ctx = DCtx::create();
    ctx.init().map_err(|err| DecodingError::DecompressionFailed(get_error_name(err)))?;

    let mut in_buffer = InBuffer::around(&input);
    let mut out = vec![0u8; DCtx::out_size()];

    loop {
        let mut out_buffer = OutBuffer::around(out.as_mut_slice());
        let hint = ctx
            .decompress_stream(&mut out_buffer, &mut in_buffer)
            .map_err(|err| DecodingError::DecompressionFailed(get_error_name(err)))?;
        let written = out_buffer.pos();
        output.extend_from_slice(&out[..written]);

        // the frame is fully decoded and flushed.
        if hint == 0 {
            break
        }
        if written == 0 && in_buffer.pos() == input.len() {
            return Err(DecodingError::DecompressionFailed("truncated frame"))
        }
    }

    if output.is_empty() {
        return Err(DecodingError::DecompressionFailed("empty output"))
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decompress_and_ignore_trailing_bytes() -> eyre::Result<()> {
        let data = b"scroll batch payload ".repeat(64);
        let compressed = ::zstd::bulk::compress(&data, 0)?;

        let mut stripped = compressed[4..].to_vec();
        stripped.extend_from_slice(&[0u8; 128]);

        assert_eq!(decompress_blob_data(&stripped)?, data);
        Ok(())
    }

    #[test]
    fn test_should_fail_on_truncated_frame() -> eyre::Result<()> {
        let data = (0..4096u32).flat_map(|i| i.to_le_bytes()).collect::<Vec<_>>();
        let compressed = ::zstd::bulk::compress(&data, 0)?;

        let truncated = &compressed[4..compressed.len() / 2];
        assert!(decompress_blob_data(truncated).is_err());
        Ok(())
    }
}
