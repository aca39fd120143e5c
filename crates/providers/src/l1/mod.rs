pub(crate) mod blob;
pub(crate) mod chain;
pub(crate) mod message;

use crate::{BlobProvider, L1ChainReader, L1MessageProvider};
use std::sync::Arc;

use alloy_eips::eip4844::Blob;
use alloy_primitives::{Bytes, B256};
use alloy_rpc_types_eth::{BlockNumberOrTag, Log};
use alloy_transport::{RpcError, TransportErrorKind};
use scroll_alloy_consensus::TxL1Message;

/// An instance of the trait can be used to provide all the L1 data required by the data
/// availability syncer.
pub trait L1Provider: L1ChainReader + BlobProvider + L1MessageProvider {}
impl<T> L1Provider for T where T: L1ChainReader + BlobProvider + L1MessageProvider {}

/// An error occurring at the [`L1Provider`].
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// Error at the beacon provider.
    #[error("Beacon provider error: {0}")]
    BeaconProvider(#[from] reqwest::Error),
    /// Invalid timestamp for slot.
    #[error("invalid block timestamp: genesis {0}, provided {1}")]
    InvalidBlockTimestamp(u64, u64),
    /// L1 RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The requested block is not known to the L1 node.
    #[error("missing block {0}")]
    MissingBlock(BlockNumberOrTag),
    /// The requested transaction is not known to the L1 node.
    #[error("missing transaction {0}")]
    MissingTransaction(B256),
    /// The transaction carries no blob versioned hash.
    #[error("missing blob versioned hash in transaction {0}")]
    MissingBlobVersionedHash(B256),
    /// The log lacks a field required to locate its transaction.
    #[error("missing log field {0}")]
    MissingLogField(&'static str),
    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}

/// An implementation of the [`L1Provider`] trait composed of the three providers.
#[derive(Debug, Clone)]
pub struct FullL1Provider<CR, L1MP, BP> {
    /// The L1 chain reader.
    l1_chain_reader: CR,
    /// The L1 message provider.
    l1_message_provider: L1MP,
    /// The blob provider.
    l1_blob_provider: BP,
}

impl<CR, L1MP, BP> FullL1Provider<CR, L1MP, BP> {
    /// Returns a new [`FullL1Provider`] from the provided [`L1ChainReader`],
    /// [`L1MessageProvider`] and [`BlobProvider`].
    pub const fn new(l1_chain_reader: CR, l1_message_provider: L1MP, l1_blob_provider: BP) -> Self {
        Self { l1_chain_reader, l1_message_provider, l1_blob_provider }
    }
}

#[async_trait::async_trait]
impl<CR: Send + Sync, L1MP: Send + Sync, BP: BlobProvider> BlobProvider
    for FullL1Provider<CR, L1MP, BP>
{
    async fn blob(
        &self,
        block_timestamp: u64,
        hash: B256,
    ) -> Result<Option<Arc<Blob>>, L1ProviderError> {
        self.l1_blob_provider.blob(block_timestamp, hash).await
    }
}

#[async_trait::async_trait]
impl<CR: Send + Sync, L1MP: L1MessageProvider, BP: Send + Sync> L1MessageProvider
    for FullL1Provider<CR, L1MP, BP>
{
    async fn l1_message(&self, queue_index: u64) -> Result<Option<TxL1Message>, L1ProviderError> {
        self.l1_message_provider.l1_message(queue_index).await
    }
}

#[async_trait::async_trait]
impl<CR: L1ChainReader, L1MP: Send + Sync, BP: Send + Sync> L1ChainReader
    for FullL1Provider<CR, L1MP, BP>
{
    async fn finalized_block_number(&self) -> Result<u64, L1ProviderError> {
        self.l1_chain_reader.finalized_block_number().await
    }

    async fn rollup_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError> {
        self.l1_chain_reader.rollup_logs(from, to).await
    }

    async fn transaction_input(&self, log: &Log) -> Result<Bytes, L1ProviderError> {
        self.l1_chain_reader.transaction_input(log).await
    }

    async fn transaction_blob_versioned_hash(&self, log: &Log) -> Result<B256, L1ProviderError> {
        self.l1_chain_reader.transaction_blob_versioned_hash(log).await
    }

    async fn block_timestamp(&self, number: u64) -> Result<u64, L1ProviderError> {
        self.l1_chain_reader.block_timestamp(number).await
    }
}
