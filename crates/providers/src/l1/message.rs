use crate::L1ProviderError;

use scroll_alloy_consensus::TxL1Message;

/// An instance of the trait provides random access to the L1 message queue by queue index.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc, &)]
pub trait L1MessageProvider: Send + Sync {
    /// Returns the L1 message at the provided queue index, or [`None`] if the message is unknown
    /// to the provider.
    async fn l1_message(&self, queue_index: u64) -> Result<Option<TxL1Message>, L1ProviderError>;
}
