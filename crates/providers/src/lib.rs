//! The crate exposes the L1 providers consumed by the data availability syncer, along with their
//! implementations.

pub use l1::{
    blob::{BeaconClientProvider, BlobProvider},
    chain::{AlloyL1ChainReader, L1ChainReader},
    message::L1MessageProvider,
    FullL1Provider, L1Provider, L1ProviderError,
};
mod l1;

/// Test utils for providers.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
