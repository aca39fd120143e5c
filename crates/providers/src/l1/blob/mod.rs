//! Exposes the [`BlobProvider`] trait allowing to retrieve blobs.

mod client;
pub use client::BeaconClientProvider;

use crate::L1ProviderError;
use std::sync::Arc;

use alloy_eips::eip4844::Blob;
use alloy_primitives::B256;

/// An instance of the trait can be used to fetch L1 blob data.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc, &)]
pub trait BlobProvider: Sync + Send {
    /// Returns corresponding blob data for the provided hash, using the timestamp of the block
    /// which included the blob transaction to locate it.
    async fn blob(
        &self,
        block_timestamp: u64,
        hash: B256,
    ) -> Result<Option<Arc<Blob>>, L1ProviderError>;
}
