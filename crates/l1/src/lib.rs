//! ABI bindings for the Scroll rollup contract deployed on L1.

pub mod abi;

pub use abi::{
    calls::{CommitBatchArgs, CommitBatchCall, InvalidCommitBatchCall},
    logs::{CommitBatch, FinalizeBatch, RevertBatch, RollupEvent},
};
