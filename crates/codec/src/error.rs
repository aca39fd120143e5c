/// An error occurring during the codec process.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An error occurring at the decoding state.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

/// An error occurring during the decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodingError {
    #[error("unsupported codec version {0}")]
    UnsupportedCodecVersion(u8),
    #[error("codec version {0} does not carry a blob")]
    UnexpectedBlob(u8),
    #[error("empty chunk")]
    EmptyChunk,
    #[error("chunk too short: declared {blocks} blocks, got {len} bytes")]
    ChunkTooShort { blocks: usize, len: usize },
    #[error("invalid parent batch header length {0}")]
    InvalidParentHeaderLength(usize),
    #[error("l1 message queue overflow: parent total {parent}, batch total {total}")]
    L1MessageQueueOverflow { parent: u64, total: u64 },
    #[error("invalid skipped l1 message bitmap: {len} bytes for {total} l1 messages")]
    InvalidSkippedL1MessageBitmap { len: usize, total: u64 },
    #[error("blob declares {declared} chunks, batch has {expected}")]
    ChunkCountMismatch { declared: usize, expected: usize },
    #[error("blob declares {0} chunks, above the maximum of {1}")]
    TooManyChunks(usize, usize),
    #[error("decompression failed: {0}")]
    DecompressionFailed(&'static str),
    #[error("malformed rlp transaction")]
    MalformedTransaction,
    #[error("end of file")]
    Eof,
}
