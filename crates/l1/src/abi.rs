//! Calls and events of the Scroll rollup contract.

/// The commit batch calls.
pub mod calls;

/// The rollup contract events.
pub mod logs;
