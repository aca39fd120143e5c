use std::vec::Vec;

use alloy_primitives::{Bytes, FixedBytes};
use alloy_sol_types::{sol, SolCall};

sol! {
    #[derive(Debug)]
    function commitBatch(
        uint8 version,
        bytes calldata parent_batch_header,
        bytes[] memory chunks,
        bytes calldata skipped_l1_message_bitmap
    ) external;

    #[derive(Debug)]
    function commitBatchWithBlobProof(
        uint8 version,
        bytes calldata parent_batch_header,
        bytes[] memory chunks,
        bytes calldata skipped_l1_message_bitmap,
        bytes calldata blob_data_proof
    ) external;
}

/// The length in bytes of a method selector.
const SELECTOR_LENGTH: usize = 4;

/// An error returned when the calldata of a commit transaction can't be decoded.
#[derive(Debug, thiserror::Error)]
pub enum InvalidCommitBatchCall {
    /// The calldata can't hold a method selector.
    #[error("commit batch calldata too short: got {0} bytes, need at least 4")]
    TooShort(usize),
    /// The selector matches none of the commit batch methods.
    #[error("unknown commit batch method selector {0}")]
    UnknownSelector(FixedBytes<4>),
    /// The ABI payload following the selector is invalid.
    #[error("malformed commit batch calldata: {0}")]
    Malformed(#[from] alloy_sol_types::Error),
}

/// A call to commit a batch on the L1 Scroll Rollup contract.
#[derive(Debug, derive_more::From)]
pub enum CommitBatchCall {
    /// A plain call to commit the batch.
    CommitBatch(commitBatchCall),
    /// A call to commit the batch with a blob proof.
    CommitBatchWithBlobProof(commitBatchWithBlobProofCall),
}

impl CommitBatchCall {
    /// Tries to decode the calldata into a [`CommitBatchCall`], using the method selector to pick
    /// the call shape.
    pub fn try_decode(calldata: &[u8]) -> Result<Self, InvalidCommitBatchCall> {
        let selector: [u8; SELECTOR_LENGTH] = calldata
            .get(..SELECTOR_LENGTH)
            .and_then(|sel| sel.try_into().ok())
            .ok_or(InvalidCommitBatchCall::TooShort(calldata.len()))?;

        match selector {
            commitBatchCall::SELECTOR => Ok(commitBatchCall::abi_decode(calldata)?.into()),
            commitBatchWithBlobProofCall::SELECTOR => {
                Ok(commitBatchWithBlobProofCall::abi_decode(calldata)?.into())
            }
            sel => Err(InvalidCommitBatchCall::UnknownSelector(sel.into())),
        }
    }

    /// Returns the version for the commit call.
    pub const fn version(&self) -> u8 {
        match self {
            Self::CommitBatch(b) => b.version,
            Self::CommitBatchWithBlobProof(b) => b.version,
        }
    }

    /// Returns the parent batch header for the commit call.
    pub const fn parent_batch_header(&self) -> &Bytes {
        match self {
            Self::CommitBatch(b) => &b.parent_batch_header,
            Self::CommitBatchWithBlobProof(b) => &b.parent_batch_header,
        }
    }

    /// Returns the chunks for the commit call.
    pub fn chunks(&self) -> &[Bytes] {
        match self {
            Self::CommitBatch(b) => &b.chunks,
            Self::CommitBatchWithBlobProof(b) => &b.chunks,
        }
    }

    /// Returns the skipped L1 message bitmap for the commit call.
    pub const fn skipped_l1_message_bitmap(&self) -> &Bytes {
        match self {
            Self::CommitBatch(b) => &b.skipped_l1_message_bitmap,
            Self::CommitBatchWithBlobProof(b) => &b.skipped_l1_message_bitmap,
        }
    }
}

/// The arguments of a commit batch call, shared by both call shapes. The blob data proof carried by
/// [`commitBatchWithBlobProofCall`] is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitBatchArgs {
    /// The codec version of the batch.
    pub version: u8,
    /// The encoded header of the parent batch.
    pub parent_batch_header: Bytes,
    /// The encoded chunks of the batch.
    pub chunks: Vec<Bytes>,
    /// The bitmap of skipped L1 messages.
    pub skipped_l1_message_bitmap: Bytes,
}

impl From<CommitBatchCall> for CommitBatchArgs {
    fn from(call: CommitBatchCall) -> Self {
        match call {
            CommitBatchCall::CommitBatch(b) => Self {
                version: b.version,
                parent_batch_header: b.parent_batch_header,
                chunks: b.chunks,
                skipped_l1_message_bitmap: b.skipped_l1_message_bitmap,
            },
            CommitBatchCall::CommitBatchWithBlobProof(b) => Self {
                version: b.version,
                parent_batch_header: b.parent_batch_header,
                chunks: b.chunks,
                skipped_l1_message_bitmap: b.skipped_l1_message_bitmap,
            },
        }
    }
}
