/// The length in bytes of each item in the skipped L1 messages bitmap.
pub const SKIPPED_L1_MESSAGE_BITMAP_ITEM_BYTES_SIZE: usize = 32;

/// The count of L1 messages covered by a single item of the skipped L1 messages bitmap.
pub const SKIPPED_L1_MESSAGE_BITMAP_ITEM_BITS: u64 = 256;

/// The length in bytes of the transaction length prefix in v0 chunks.
pub const TRANSACTION_LENGTH_BYTES_SIZE: usize = 4;

/// The length in bytes of the chunk count in the blob payload.
pub const BLOB_NUM_CHUNKS_BYTES_SIZE: usize = 2;

/// The length in bytes of each chunk size in the blob payload.
pub const BLOB_CHUNK_SIZE_BYTES_SIZE: usize = 4;
