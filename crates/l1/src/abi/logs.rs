use alloy_primitives::{Log, B256, U256};
use alloy_sol_types::{sol, SolEvent};

sol! {
    #[derive(Debug)]
    event CommitBatch(uint256 indexed batch_index, bytes32 indexed batch_hash);

    #[derive(Debug)]
    event RevertBatch(uint256 indexed batch_index, bytes32 indexed batch_hash);

    #[derive(Debug)]
    event FinalizeBatch(
        uint256 indexed batch_index,
        bytes32 indexed batch_hash,
        bytes32 state_root,
        bytes32 withdraw_root
    );
}

/// The batch lifecycle events emitted by the rollup contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupEvent {
    /// A batch was committed.
    CommitBatch,
    /// A committed batch was reverted.
    RevertBatch,
    /// A batch was finalized.
    FinalizeBatch,
}

impl RollupEvent {
    /// The signature hashes of all the rollup events.
    pub const SIGNATURES: [B256; 3] =
        [CommitBatch::SIGNATURE_HASH, RevertBatch::SIGNATURE_HASH, FinalizeBatch::SIGNATURE_HASH];

    /// Returns the event matching the provided topic, if any.
    pub fn from_topic(topic: &B256) -> Option<Self> {
        match *topic {
            CommitBatch::SIGNATURE_HASH => Some(Self::CommitBatch),
            RevertBatch::SIGNATURE_HASH => Some(Self::RevertBatch),
            FinalizeBatch::SIGNATURE_HASH => Some(Self::FinalizeBatch),
            _ => None,
        }
    }

    /// Returns the name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CommitBatch => "CommitBatch",
            Self::RevertBatch => "RevertBatch",
            Self::FinalizeBatch => "FinalizeBatch",
        }
    }

    /// Decodes the batch index carried by the log, which must be a log of this event.
    pub fn batch_index(&self, log: &Log) -> Result<U256, alloy_sol_types::Error> {
        Ok(match self {
            Self::CommitBatch => CommitBatch::decode_log(log)?.data.batch_index,
            Self::RevertBatch => RevertBatch::decode_log(log)?.data.batch_index,
            Self::FinalizeBatch => FinalizeBatch::decode_log(log)?.data.batch_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, Address};

    #[test]
    fn test_should_classify_topics() {
        assert_eq!(
            RollupEvent::from_topic(&CommitBatch::SIGNATURE_HASH),
            Some(RollupEvent::CommitBatch)
        );
        assert_eq!(
            RollupEvent::from_topic(&RevertBatch::SIGNATURE_HASH),
            Some(RollupEvent::RevertBatch)
        );
        assert_eq!(
            RollupEvent::from_topic(&FinalizeBatch::SIGNATURE_HASH),
            Some(RollupEvent::FinalizeBatch)
        );
        assert_eq!(RollupEvent::from_topic(&B256::ZERO), None);
    }

    #[test]
    fn test_should_decode_batch_index() -> eyre::Result<()> {
        let event = FinalizeBatch {
            batch_index: U256::from(42),
            batch_hash: b256!("0x0000000000000000000000000000000000000000000000000000000000000001"),
            state_root: B256::ZERO,
            withdraw_root: B256::ZERO,
        };
        let log = Log { address: Address::ZERO, data: event.encode_log_data() };

        let kind = RollupEvent::from_topic(&log.topics()[0]).expect("finalize batch topic");
        assert_eq!(kind.batch_index(&log)?, U256::from(42));

        // decoding with the wrong event kind fails.
        assert!(RollupEvent::CommitBatch.batch_index(&log).is_err());

        Ok(())
    }
}
