pub mod block;
pub mod clock;
pub mod identity;
pub mod model;

use log::warn;
use std::env;

pub use block::{Block, BlockTransactions};
#[cfg(test)]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use model::Synthesizer;

/// Seed mixed into every derived identifier.
pub const DEFAULT_CHAIN_SEED: &str = "KrossChain";

/// 2025-07-02T00:00:00Z
pub const DEFAULT_GENESIS_TIMESTAMP: i64 = 1_751_414_400;

/// Seconds between two consecutive blocks.
pub const DEFAULT_BLOCK_INTERVAL_SECS: i64 = 15;

/// Block gas limit (constant for every block).
pub const BLOCK_GAS_LIMIT: u64 = 30_000_000;

/// Gas charged by every synthesized transfer.
pub const TX_GAS: u64 = 21_000;

/// Gas price in wei (10 gwei).
pub const TX_GAS_PRICE: u128 = 10_000_000_000;

/// Native asset of the chain.
pub const NATIVE_SYMBOL: &str = "KROSS";
pub const NATIVE_DECIMALS: u32 = 18;

/// Difficulty lands in `[DIFFICULTY_FLOOR, DIFFICULTY_FLOOR + DIFFICULTY_SPREAD)`.
pub const DIFFICULTY_SPREAD: u64 = 1_000_000;
pub const DIFFICULTY_FLOOR: u64 = 131_072;

/// Block size lands in `[SIZE_FLOOR, SIZE_FLOOR + SIZE_SPREAD)`.
pub const SIZE_FLOOR: u64 = 1_000;
pub const SIZE_SPREAD: u64 = 2_000;

/// Chain-wide constants that can be overridden from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub chain_seed: String,
    pub genesis_timestamp: i64,
    pub block_interval_secs: i64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_seed: DEFAULT_CHAIN_SEED.to_string(),
            genesis_timestamp: DEFAULT_GENESIS_TIMESTAMP,
            block_interval_secs: DEFAULT_BLOCK_INTERVAL_SECS,
        }
    }
}

impl ChainConfig {
    /// Read `KROSS_CHAIN_SEED`, `KROSS_GENESIS_TIMESTAMP` and
    /// `KROSS_BLOCK_INTERVAL_SECS`, keeping defaults for anything missing or bad.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let chain_seed = env::var("KROSS_CHAIN_SEED")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.chain_seed);

        let genesis_timestamp = match env::var("KROSS_GENESIS_TIMESTAMP") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("KROSS_GENESIS_TIMESTAMP={raw:?} is not an integer, using default");
                defaults.genesis_timestamp
            }),
            Err(_) => defaults.genesis_timestamp,
        };

        let block_interval_secs = match env::var("KROSS_BLOCK_INTERVAL_SECS") {
            Ok(raw) => match raw.trim().parse::<i64>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!("KROSS_BLOCK_INTERVAL_SECS={raw:?} must be a positive integer, using default");
                    defaults.block_interval_secs
                }
            },
            Err(_) => defaults.block_interval_secs,
        };

        Self {
            chain_seed,
            genesis_timestamp,
            block_interval_secs,
        }
    }
}
