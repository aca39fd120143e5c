//! Decoding implementations for the commit data.

/// Skipped L1 messages bitmap decoding.
pub mod bitmap;

/// Batch header helpers.
pub mod batch_header;

/// Blob related helpers.
pub mod blob;

/// Constants used across the codec versions.
pub mod constants;

mod macros;

/// Decoding implementation for a transaction.
pub mod transaction;

/// V0 implementation of the decoding.
pub mod v0;

/// V1 implementation of the decoding.
pub mod v1;

/// V2 implementation of the decoding.
pub mod v2;
