use alloy_primitives::{B256, U256};
use rollup_node_providers::L1ProviderError;
use scroll_codec::{CodecError, DecodingError};
use scroll_l1::InvalidCommitBatchCall;

/// An error occurring while syncing the data availability layer.
#[derive(Debug, thiserror::Error)]
pub enum DaSyncError {
    /// An error at the L1 provider.
    #[error(transparent)]
    L1Provider(#[from] L1ProviderError),
    /// An error in the codec.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The commit transaction input is not a commit batch call.
    #[error(transparent)]
    InvalidCommitBatchCall(#[from] InvalidCommitBatchCall),
    /// The log topic matches none of the rollup events.
    #[error("unknown event topic {topic:?} in transaction {tx_hash:?}")]
    UnknownEvent {
        /// The first topic of the log.
        topic: Option<B256>,
        /// The hash of the transaction which emitted the log.
        tx_hash: Option<B256>,
    },
    /// The log failed to decode into its event.
    #[error("failed to decode {event} log: {error}")]
    DecodeLog {
        /// The name of the event.
        event: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
    /// The batch index does not fit a u64.
    #[error("invalid batch index {0}")]
    InvalidBatchIndex(U256),
    /// The log lacks a required field.
    #[error("missing log field {0}")]
    MissingLogField(&'static str),
    /// The blob provider doesn't know the blob.
    #[error("missing blob {hash} for batch {batch_index}")]
    MissingBlob {
        /// The index of the batch.
        batch_index: u64,
        /// The versioned hash of the blob.
        hash: B256,
    },
    /// The fetched blob doesn't hash to the versioned hash of the commit transaction.
    #[error("blob hash mismatch: expected {expected}, computed {computed}")]
    BlobHashMismatch {
        /// The versioned hash from the commit transaction.
        expected: B256,
        /// The versioned hash of the fetched blob.
        computed: B256,
    },
    /// The KZG commitment of the blob failed.
    #[error("kzg commitment failed: {0}")]
    Kzg(c_kzg::Error),
    /// A non skipped L1 message is unknown to the L1 message provider.
    #[error("missing l1 message at queue index {0}")]
    MissingL1Message(u64),
    /// The L1 message provider returned a message at another queue index.
    #[error("l1 message queue index mismatch: expected {expected}, got {got}")]
    L1MessageIndexMismatch {
        /// The requested queue index.
        expected: u64,
        /// The queue index of the returned message.
        got: u64,
    },
}

impl From<DecodingError> for DaSyncError {
    fn from(error: DecodingError) -> Self {
        Self::Codec(error.into())
    }
}

impl DaSyncError {
    /// Returns true if the error is caused by a failing collaborator and the operation can be
    /// retried.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::L1Provider(
                L1ProviderError::BeaconProvider(_) |
                    L1ProviderError::Rpc(_) |
                    L1ProviderError::MissingBlock(_) |
                    L1ProviderError::MissingTransaction(_) |
                    L1ProviderError::Other(_)
            )
        )
    }
}
