use crate::L1ProviderError;

use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, Filter, Log, Transaction, TransactionTrait};
use scroll_l1::RollupEvent;

/// An instance of the trait can read the rollup related data from the L1 chain.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc, &)]
pub trait L1ChainReader: Send + Sync {
    /// Returns the number of the latest finalized L1 block.
    async fn finalized_block_number(&self) -> Result<u64, L1ProviderError>;

    /// Returns the rollup contract logs emitted in the inclusive `[from, to]` block range, in
    /// chain order.
    async fn rollup_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError>;

    /// Returns the input of the transaction which emitted the log.
    async fn transaction_input(&self, log: &Log) -> Result<Bytes, L1ProviderError>;

    /// Returns the first blob versioned hash of the transaction which emitted the log.
    async fn transaction_blob_versioned_hash(&self, log: &Log) -> Result<B256, L1ProviderError>;

    /// Returns the timestamp of the L1 block.
    async fn block_timestamp(&self, number: u64) -> Result<u64, L1ProviderError>;
}

/// Returns the hash of the transaction which emitted the log.
pub fn log_transaction_hash(log: &Log) -> Result<B256, L1ProviderError> {
    log.transaction_hash.ok_or(L1ProviderError::MissingLogField("transaction_hash"))
}

/// An implementation of the [`L1ChainReader`] backed by an L1 execution node.
#[derive(Debug, Clone)]
pub struct AlloyL1ChainReader<P> {
    /// The L1 execution node provider.
    provider: P,
    /// The address of the rollup contract.
    rollup_address: Address,
}

impl<P> AlloyL1ChainReader<P> {
    /// Returns a new [`AlloyL1ChainReader`] reading the logs of the provided rollup contract.
    pub const fn new(provider: P, rollup_address: Address) -> Self {
        Self { provider, rollup_address }
    }

    /// Returns the log filter for the rollup events in the inclusive block range.
    pub fn filter(&self, from: u64, to: u64) -> Filter {
        Filter::new()
            .address(self.rollup_address)
            .event_signature(RollupEvent::SIGNATURES.to_vec())
            .from_block(from)
            .to_block(to)
    }
}

impl<P: Provider> AlloyL1ChainReader<P> {
    async fn transaction(&self, log: &Log) -> Result<Transaction, L1ProviderError> {
        let hash = log_transaction_hash(log)?;
        self.provider
            .get_transaction_by_hash(hash)
            .await?
            .ok_or(L1ProviderError::MissingTransaction(hash))
    }
}

#[async_trait::async_trait]
impl<P: Provider> L1ChainReader for AlloyL1ChainReader<P> {
    async fn finalized_block_number(&self) -> Result<u64, L1ProviderError> {
        let block = self
            .provider
            .get_block(BlockNumberOrTag::Finalized.into())
            .await?
            .ok_or(L1ProviderError::MissingBlock(BlockNumberOrTag::Finalized))?;
        Ok(block.header.number)
    }

    async fn rollup_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError> {
        let filter = self.filter(from, to);
        tracing::trace!(target: "scroll::providers", ?filter, "fetching logs");
        Ok(self.provider.get_logs(&filter).await?)
    }

    async fn transaction_input(&self, log: &Log) -> Result<Bytes, L1ProviderError> {
        Ok(self.transaction(log).await?.input().clone())
    }

    async fn transaction_blob_versioned_hash(&self, log: &Log) -> Result<B256, L1ProviderError> {
        let hash = log_transaction_hash(log)?;
        let tx = self.transaction(log).await?;
        tx.blob_versioned_hashes()
            .and_then(|hashes| hashes.first().copied())
            .ok_or(L1ProviderError::MissingBlobVersionedHash(hash))
    }

    async fn block_timestamp(&self, number: u64) -> Result<u64, L1ProviderError> {
        let block = self
            .provider
            .get_block(BlockNumberOrTag::Number(number).into())
            .await?
            .ok_or(L1ProviderError::MissingBlock(BlockNumberOrTag::Number(number)))?;
        Ok(block.header.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address, Log as PrimitiveLog, U256};
    use alloy_rpc_types_eth::FilterBlockOption;
    use alloy_sol_types::SolEvent;
    use scroll_l1::CommitBatch;

    #[test]
    fn test_should_filter_rollup_events_in_range() {
        let rollup = address!("0x2D567EcE699Eabe5afCd141eDB7A4f2D0D6ce8a0");
        let reader = AlloyL1ChainReader::new((), rollup);
        let filter = reader.filter(10, 19);

        assert!(filter.address.matches(&rollup));
        for signature in RollupEvent::SIGNATURES {
            assert!(filter.topics[0].matches(&signature));
        }
        assert!(matches!(
            filter.block_option,
            FilterBlockOption::Range {
                from_block: Some(BlockNumberOrTag::Number(10)),
                to_block: Some(BlockNumberOrTag::Number(19))
            }
        ));
    }

    #[test]
    fn test_should_match_encoded_rollup_logs() {
        let reader = AlloyL1ChainReader::new((), Address::ZERO);
        let filter = reader.filter(0, 0);

        let commit =
            CommitBatch { batch_index: U256::from(7), batch_hash: B256::repeat_byte(0x11) };
        let data = commit.encode_log_data();
        assert!(filter.topics[0].matches(&data.topics()[0]));

        let log = PrimitiveLog { address: Address::ZERO, data };
        let batch_index = RollupEvent::from_topic(&log.topics()[0])
            .and_then(|event| event.batch_index(&log).ok());
        assert_eq!(batch_index, Some(U256::from(7)));

        // an unrelated event signature is filtered out.
        assert!(!filter.topics[0].matches(&B256::repeat_byte(0x22)));
    }

    #[test]
    fn test_should_require_transaction_hash() {
        let log = Log::default();
        assert!(matches!(
            log_transaction_hash(&log),
            Err(L1ProviderError::MissingLogField("transaction_hash"))
        ));
    }
}
