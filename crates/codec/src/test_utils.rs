//! Encoders producing commit data for tests.

use crate::{
    decoding::{
        constants::{BLOB_CHUNK_SIZE_BYTES_SIZE, BLOB_NUM_CHUNKS_BYTES_SIZE},
        v1, v2,
    },
    BlockContext, Chunk,
};

use alloy_eips::eip4844::{Blob, USABLE_BYTES_PER_BLOB};
use alloy_primitives::Bytes;

/// Encodes a batch header with the provided fields, padded to the length of a v0 batch header.
pub fn encode_batch_header(version: u8, batch_index: u64, total_l1_message_popped: u64) -> Bytes {
    let mut header = vec![0u8; 89];
    header[0] = version;
    header[1..9].copy_from_slice(&batch_index.to_be_bytes());
    header[17..25].copy_from_slice(&total_l1_message_popped.to_be_bytes());
    header.into()
}

fn encode_block_context(context: &BlockContext, out: &mut Vec<u8>) {
    out.extend_from_slice(&context.number.to_be_bytes());
    out.extend_from_slice(&context.timestamp.to_be_bytes());
    out.extend_from_slice(&context.base_fee.to_be_bytes::<32>());
    out.extend_from_slice(&context.gas_limit.to_be_bytes());
    out.extend_from_slice(&context.num_transactions.to_be_bytes());
    out.extend_from_slice(&context.num_l1_messages.to_be_bytes());
}

/// Encodes the block count and block contexts of the chunk, as committed by the blob versions.
pub fn encode_chunk_calldata(chunk: &Chunk) -> Bytes {
    let mut out = vec![chunk.blocks.len() as u8];
    for block in &chunk.blocks {
        encode_block_context(&block.context, &mut out);
    }
    out.into()
}

/// Encodes the chunk as committed by the v0 codec, with length prefixed L2 transactions.
pub fn encode_chunk_v0(chunk: &Chunk) -> Bytes {
    let mut out = encode_chunk_calldata(chunk).to_vec();
    for tx in chunk.blocks.iter().flat_map(|b| &b.transactions) {
        out.extend_from_slice(&(tx.len() as u32).to_be_bytes());
        out.extend_from_slice(tx);
    }
    out.into()
}

fn encode_payload(chunks: &[Chunk], max_num_chunks: usize) -> eyre::Result<Vec<u8>> {
    if chunks.len() > max_num_chunks {
        eyre::bail!("too many chunks: {}", chunks.len())
    }

    let mut metadata = Vec::with_capacity(
        BLOB_NUM_CHUNKS_BYTES_SIZE + max_num_chunks * BLOB_CHUNK_SIZE_BYTES_SIZE,
    );
    metadata.extend_from_slice(&(chunks.len() as u16).to_be_bytes());

    let mut data = Vec::new();
    for i in 0..max_num_chunks {
        let start = data.len();
        for tx in chunks.get(i).into_iter().flat_map(|c| &c.blocks).flat_map(|b| &b.transactions) {
            data.extend_from_slice(tx);
        }
        metadata.extend_from_slice(&((data.len() - start) as u32).to_be_bytes());
    }

    metadata.extend_from_slice(&data);
    Ok(metadata)
}

/// Packs the canonical bytes into a blob, leaving the first byte of each field element zero.
pub fn pack_blob(canonical: &[u8]) -> eyre::Result<Blob> {
    if canonical.len() > USABLE_BYTES_PER_BLOB {
        eyre::bail!("payload of {} bytes does not fit in a blob", canonical.len())
    }

    let mut blob = Blob::ZERO;
    for (i, element) in canonical.chunks(31).enumerate() {
        let offset = i * 32 + 1;
        blob[offset..offset + element.len()].copy_from_slice(element);
    }
    Ok(blob)
}

/// Encodes the L2 transactions of the chunks in a v1 blob.
pub fn encode_blob_v1(chunks: &[Chunk]) -> eyre::Result<Blob> {
    pack_blob(&encode_payload(chunks, v1::MAX_NUM_CHUNKS)?)
}

/// Encodes the L2 transactions of the chunks in a v2 blob, compressed and stripped of the zstd
/// magic number.
pub fn encode_blob_v2(chunks: &[Chunk]) -> eyre::Result<Blob> {
    let payload = encode_payload(chunks, v2::MAX_NUM_CHUNKS)?;
    let compressed = zstd::bulk::compress(&payload, 0)?;
    pack_blob(&compressed[4..])
}
