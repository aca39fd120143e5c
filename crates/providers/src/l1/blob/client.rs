//! Credit to <https://github.com/op-rs/kona/tree/main/crates/providers/providers-alloy>

use crate::{BlobProvider, L1ProviderError};
use std::{num::NonZeroUsize, sync::Arc};

use alloy_eips::eip4844::{kzg_to_versioned_hash, Blob};
use alloy_primitives::B256;
use alloy_rpc_types_beacon::sidecar::{BeaconBlobBundle, BlobData};
use lru::LruCache;
use reqwest::Client;
use tokio::sync::Mutex;

/// The size of the blob cache for the provider.
const PROVIDER_BLOB_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// An API response.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct APIResponse<T> {
    /// The data.
    pub data: T,
}

/// A reduced genesis data.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct ReducedGenesisData {
    /// The genesis time.
    #[serde(rename = "genesis_time")]
    #[serde(with = "alloy_serde::quantity")]
    genesis_time: u64,
}

/// A reduced config data.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct ReducedConfigData {
    /// The seconds per slot.
    #[serde(rename = "SECONDS_PER_SLOT")]
    #[serde(with = "alloy_serde::quantity")]
    seconds_per_slot: u64,
}

/// An implementation of blob provider using a beacon client.
#[derive(Debug, Clone)]
pub struct BeaconClientProvider {
    /// The base URL of the beacon API.
    pub base: String,
    /// The inner reqwest client.
    pub inner: Client,
    /// The cache for blobs from similar blocks.
    cache: Arc<Mutex<LruCache<B256, Arc<Blob>>>>,
    /// The genesis timestamp for the Beacon chain.
    pub genesis_timestamp: u64,
    /// The slot interval for the Beacon chain.
    pub slot_interval: u64,
}

impl BeaconClientProvider {
    /// The config spec engine api method.
    const SPEC_METHOD: &'static str = "eth/v1/config/spec";

    /// The beacon genesis engine api method.
    const GENESIS_METHOD: &'static str = "eth/v1/beacon/genesis";

    /// The blob sidecars engine api method prefix.
    const SIDECARS_METHOD_PREFIX: &'static str = "eth/v1/beacon/blob_sidecars";

    /// Returns a new [`BeaconClientProvider`] for the provided Beacon chain parameters.
    pub fn new(base: reqwest::Url, genesis_timestamp: u64, slot_interval: u64) -> Self {
        // If base ends with a slash, remove it
        let mut base = base.to_string();
        if base.ends_with('/') {
            base.remove(base.len() - 1);
        }

        Self {
            base,
            inner: Client::new(),
            cache: Arc::new(Mutex::new(LruCache::new(PROVIDER_BLOB_CACHE_SIZE))),
            genesis_timestamp,
            slot_interval,
        }
    }

    /// Creates a new [`BeaconClientProvider`] from the provided base url, querying the Beacon
    /// chain parameters from the node.
    pub async fn new_http(base: reqwest::Url) -> Result<Self, L1ProviderError> {
        let mut provider = Self::new(base, 0, 0);

        let config = provider.config_spec().await?;
        let genesis = provider.beacon_genesis().await?;
        if config.data.seconds_per_slot == 0 {
            return Err(L1ProviderError::Other("beacon chain reported a zero slot interval"))
        }

        provider.slot_interval = config.data.seconds_per_slot;
        provider.genesis_timestamp = genesis.data.genesis_time;
        tracing::info!(
            target: "scroll::providers",
            base = %provider.base,
            genesis_timestamp = provider.genesis_timestamp,
            slot_interval = provider.slot_interval,
            "connected to beacon client"
        );

        Ok(provider)
    }

    /// Returns the reduced configuration data for the Beacon client.
    async fn config_spec(&self) -> Result<APIResponse<ReducedConfigData>, reqwest::Error> {
        let first = self.inner.get(format!("{}/{}", self.base, Self::SPEC_METHOD)).send().await?;
        first.json::<APIResponse<ReducedConfigData>>().await
    }

    /// Returns the Beacon genesis information.
    async fn beacon_genesis(&self) -> Result<APIResponse<ReducedGenesisData>, reqwest::Error> {
        let first =
            self.inner.get(format!("{}/{}", self.base, Self::GENESIS_METHOD)).send().await?;
        first.json::<APIResponse<ReducedGenesisData>>().await
    }

    /// Returns the blobs for the provided slot.
    async fn blobs(&self, slot: u64) -> Result<Vec<BlobData>, reqwest::Error> {
        let url = format!("{}/{}/{}", self.base, Self::SIDECARS_METHOD_PREFIX, slot);
        let response = self.inner.get(&url).send().await?.error_for_status()?;
        let blob_bundle = response.json::<BeaconBlobBundle>().await?;
        Ok(blob_bundle.data)
    }

    /// Returns the beacon slot given a block timestamp.
    const fn slot(&self, block_timestamp: u64) -> Result<u64, L1ProviderError> {
        if block_timestamp < self.genesis_timestamp || self.slot_interval == 0 {
            return Err(L1ProviderError::InvalidBlockTimestamp(
                self.genesis_timestamp,
                block_timestamp,
            ))
        }

        Ok((block_timestamp - self.genesis_timestamp) / self.slot_interval)
    }
}

#[async_trait::async_trait]
impl BlobProvider for BeaconClientProvider {
    async fn blob(
        &self,
        block_timestamp: u64,
        hash: B256,
    ) -> Result<Option<Arc<Blob>>, L1ProviderError> {
        // check if the requested blob is in the cache.
        let mut cache = self.cache.lock().await;
        if let Some(blob) = cache.get(&hash) {
            return Ok(Some(blob.clone()));
        }
        // avoid holding the lock over the blob request.
        drop(cache);

        // query the blobs with the client, return target blob and store all others in cache.
        let slot = self.slot(block_timestamp)?;
        tracing::trace!(target: "scroll::providers", slot, ?hash, "fetching blob sidecars");
        let mut blobs = self
            .blobs(slot)
            .await?
            .into_iter()
            .map(|blob| (kzg_to_versioned_hash(blob.kzg_commitment.as_slice()), blob.blob))
            .collect::<Vec<_>>();

        // if we find a blob, timestamp is valid.
        // cache the other blobs and return the matched blob.
        let maybe_blob = blobs.iter().position(|(versioned_hash, _)| *versioned_hash == hash);
        if let Some(position) = maybe_blob {
            let blob = Arc::new(*blobs.remove(position).1);
            let mut cache = self.cache.lock().await;
            for (hash, blob) in blobs {
                cache.put(hash, Arc::new(*blob));
            }
            return Ok(Some(blob))
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_compute_slot_from_timestamp() -> eyre::Result<()> {
        let url = reqwest::Url::parse("http://localhost:5052/")?;
        let provider = BeaconClientProvider::new(url, 1_606_824_023, 12);

        assert_eq!(provider.base, "http://localhost:5052");
        assert_eq!(provider.slot(1_606_824_023)?, 0);
        assert_eq!(provider.slot(1_606_824_023 + 12 * 100 + 5)?, 100);
        assert!(matches!(
            provider.slot(1_606_824_022),
            Err(L1ProviderError::InvalidBlockTimestamp(1_606_824_023, 1_606_824_022))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_serve_cached_blob() -> eyre::Result<()> {
        let url = reqwest::Url::parse("http://localhost:5052")?;
        let provider = BeaconClientProvider::new(url, 0, 12);
        let blob = Arc::new(Blob::repeat_byte(0x01));
        provider.cache.lock().await.put(B256::ZERO, blob.clone());

        // a cached blob does not hit the network.
        assert_eq!(provider.blob(0, B256::ZERO).await?, Some(blob));
        Ok(())
    }
}
