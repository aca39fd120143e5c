//! Primitive types for the Rollup Node.

pub use da::{CommitBatchDa, DaEntry, FinalizeBatchDa, RevertBatchDa};
mod da;
