use std::time::Duration;

/// The default count of L1 blocks fetched per range.
pub const DEFAULT_FETCH_BLOCK_RANGE: u64 = 500;

/// The default interval in milliseconds between two polls of an exhausted L1 chain.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// The configuration of the data availability syncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaSyncConfig {
    /// The first L1 block to sync from.
    pub start_l1_block: u64,
    /// The count of L1 blocks fetched per range.
    pub fetch_block_range: u64,
    /// The interval between two polls of an exhausted L1 chain.
    pub poll_interval: Duration,
}

impl Default for DaSyncConfig {
    fn default() -> Self {
        Self {
            start_l1_block: 0,
            fetch_block_range: DEFAULT_FETCH_BLOCK_RANGE,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// The arguments for the data availability syncer.
#[derive(Debug, Clone, clap::Args)]
pub struct DaSyncArgs {
    /// The first L1 block to sync from.
    #[arg(
        long = "da.start-l1-block",
        id = "da_start_l1_block",
        value_name = "DA_START_L1_BLOCK",
        default_value_t = 0
    )]
    pub start_l1_block: u64,
    /// The count of L1 blocks fetched per range.
    #[arg(
        long = "da.fetch-block-range",
        id = "da_fetch_block_range",
        value_name = "DA_FETCH_BLOCK_RANGE",
        default_value_t = DEFAULT_FETCH_BLOCK_RANGE
    )]
    pub fetch_block_range: u64,
    /// The interval in milliseconds between two polls of an exhausted L1 chain.
    #[arg(
        long = "da.poll-interval",
        id = "da_poll_interval",
        value_name = "DA_POLL_INTERVAL_MS",
        default_value_t = DEFAULT_POLL_INTERVAL_MS
    )]
    pub poll_interval: u64,
}

impl Default for DaSyncArgs {
    fn default() -> Self {
        Self {
            start_l1_block: 0,
            fetch_block_range: DEFAULT_FETCH_BLOCK_RANGE,
            poll_interval: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl DaSyncArgs {
    /// Validates the arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_block_range == 0 {
            return Err("DA fetch block range must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl From<DaSyncArgs> for DaSyncConfig {
    fn from(args: DaSyncArgs) -> Self {
        Self {
            start_l1_block: args.start_l1_block,
            fetch_block_range: args.fetch_block_range,
            poll_interval: Duration::from_millis(args.poll_interval),
        }
    }
}
