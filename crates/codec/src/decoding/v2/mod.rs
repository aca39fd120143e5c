//! Implements the V2 decoding: identical to V1, with a zstd compressed blob payload.

pub use self::zstd::decompress_blob_data;
mod zstd;

use super::{blob::canonical_bytes, v1::decode_transactions_from_payload};
use crate::{error::DecodingError, Chunk};

use alloy_eips::eip4844::Blob;

/// The maximum count of chunks in a V2 batch.
pub const MAX_NUM_CHUNKS: usize = 45;

/// Decodes the L2 transactions from the compressed blob into the blocks of the chunks.
pub fn decode_blob_transactions(blob: &Blob, chunks: &mut [Chunk]) -> Result<(), DecodingError> {
    let payload = decompress_blob_data(&canonical_bytes(blob))?;
    decode_transactions_from_payload(&payload, chunks, MAX_NUM_CHUNKS)
}
