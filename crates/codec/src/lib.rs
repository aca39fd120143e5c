//! The codec implementation for Scroll.

pub use block::{BlockContext, Chunk, L2Block};
pub mod block;

pub mod decoding;

pub use error::{CodecError, DecodingError};
mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::decoding::{v0, v1, v2};

use alloy_eips::eip4844::Blob;
use alloy_primitives::Bytes;

/// The Codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Codec {
    /// V0 variant of the codec. Transactions are carried in the chunk calldata.
    /// <https://github.com/scroll-tech/scroll-contracts/blob/81f0db72ca5335e0dddfaa99cb415e3d1cee895f/src/libraries/codec/ChunkCodecV0.sol>
    #[display("v0")]
    V0,
    /// V1 variant of the codec. Transactions are carried in the blob.
    /// <https://github.com/scroll-tech/scroll-contracts/blob/81f0db72ca5335e0dddfaa99cb415e3d1cee895f/src/libraries/codec/ChunkCodecV1.sol>
    #[display("v1")]
    V1,
    /// V2 variant of the codec. Transactions are carried in the zstd compressed blob.
    #[display("v2")]
    V2,
}

impl TryFrom<u8> for Codec {
    type Error = DecodingError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        Ok(match version {
            0 => Self::V0,
            1 => Self::V1,
            2 => Self::V2,
            v => return Err(DecodingError::UnsupportedCodecVersion(v)),
        })
    }
}

impl Codec {
    /// Returns the version byte of the codec.
    pub const fn version(&self) -> u8 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Returns true if the L2 transactions of the batch are carried in a blob.
    pub const fn uses_blob(&self) -> bool {
        !matches!(self, Self::V0)
    }

    /// Decodes the chunks of a commit batch call into a list of [`Chunk`].
    ///
    /// For [`Codec::V0`] the returned chunks are complete. For the blob carrying versions, the
    /// blocks only contain their context and the transactions must be filled by
    /// [`Codec::decode_blob_transactions`].
    pub fn decode_chunks(&self, chunks: &[Bytes]) -> Result<Vec<Chunk>, CodecError> {
        let decode = match self {
            Self::V0 => v0::decode_chunk,
            Self::V1 | Self::V2 => v1::decode_chunk,
        };
        Ok(chunks.iter().map(|chunk| decode(chunk)).collect::<Result<Vec<_>, _>>()?)
    }

    /// Decodes the L2 transactions from the blob and distributes them over the blocks of the
    /// provided chunks.
    pub fn decode_blob_transactions(
        &self,
        blob: &Blob,
        chunks: &mut [Chunk],
    ) -> Result<(), CodecError> {
        match self {
            Self::V0 => Err(DecodingError::UnexpectedBlob(self.version()).into()),
            Self::V1 => Ok(v1::decode_blob_transactions(blob, chunks)?),
            Self::V2 => Ok(v2::decode_blob_transactions(blob, chunks)?),
        }
    }
}
