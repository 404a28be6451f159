use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::token::TokenRegistry;
use super::units::to_base_units;
use crate::blockchain::NATIVE_DECIMALS;
use crate::blockchain::identity::{ZERO_ADDRESS, is_address};

const TREASURY: &str = "0xB9ff77d1a6b9802C32632298eB5CC2FDb278049b";
const ACCOUNT_A: &str = "0xaC5aBDb1eBA4376992acbd681484e17347B667e3";
const ACCOUNT_B: &str = "0x4E8D4C2cA158d02Ed812F56B25b421c7f0B3d727";
const ACCOUNT_C: &str = "0xd372D11e6839e23EEc47D59C1a62b80909FAdCF1";

/// What a seeded transfer moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferKind {
    /// Native KROSS, value in wei.
    Native,
    /// A registered token, value in the token's smallest unit.
    Token { symbol: String },
}

/// One hand-authored transfer placed in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededTransferIntent {
    pub block_index: u64,
    pub from: String,
    pub to: String,
    pub raw_value: u128,
    pub kind: TransferKind,
    pub unique_seed: String,
}

impl SeededTransferIntent {
    pub fn native(block_index: u64, from: &str, to: &str, raw_value: u128, seed: &str) -> Self {
        Self {
            block_index,
            from: from.to_string(),
            to: to.to_string(),
            raw_value,
            kind: TransferKind::Native,
            unique_seed: seed.to_string(),
        }
    }

    pub fn token(
        block_index: u64,
        symbol: &str,
        from: &str,
        to: &str,
        raw_value: u128,
        seed: &str,
    ) -> Self {
        Self {
            block_index,
            from: from.to_string(),
            to: to.to_string(),
            raw_value,
            kind: TransferKind::Token {
                symbol: symbol.to_string(),
            },
            unique_seed: seed.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed {seed:?} sits at block 0; blocks start at 1")]
    ZeroIndex { seed: String },
    #[error("seed {seed:?} has malformed address {address}")]
    BadAddress { seed: String, address: String },
    #[error("seed {seed:?} appears twice in block {block}")]
    DuplicateSeed { block: u64, seed: String },
    #[error("seed {seed:?} references unknown token {symbol}")]
    UnknownToken { seed: String, symbol: String },
}

/// Immutable index from block number to its seeded transfers, in table order.
#[derive(Debug, Clone, Default)]
pub struct SeedTable {
    blocks: BTreeMap<u64, Vec<SeededTransferIntent>>,
}

impl SeedTable {
    /// Validate and index `intents`. Order within a block follows input order.
    pub fn new(
        intents: Vec<SeededTransferIntent>,
        tokens: &TokenRegistry,
    ) -> Result<Self, SeedError> {
        let mut blocks: BTreeMap<u64, Vec<SeededTransferIntent>> = BTreeMap::new();
        let mut seen = HashSet::new();

        for intent in intents {
            if intent.block_index == 0 {
                return Err(SeedError::ZeroIndex {
                    seed: intent.unique_seed,
                });
            }
            for address in [&intent.from, &intent.to] {
                if !is_address(address) {
                    return Err(SeedError::BadAddress {
                        seed: intent.unique_seed.clone(),
                        address: address.clone(),
                    });
                }
            }
            if let TransferKind::Token { symbol } = &intent.kind {
                if tokens.by_symbol(symbol).is_none() {
                    return Err(SeedError::UnknownToken {
                        seed: intent.unique_seed.clone(),
                        symbol: symbol.clone(),
                    });
                }
            }
            if !seen.insert((intent.block_index, intent.unique_seed.clone())) {
                return Err(SeedError::DuplicateSeed {
                    block: intent.block_index,
                    seed: intent.unique_seed,
                });
            }
            blocks.entry(intent.block_index).or_default().push(intent);
        }

        Ok(Self { blocks })
    }

    /// Intents for `index`; empty when the block carries no activity.
    pub fn get(&self, index: u64) -> &[SeededTransferIntent] {
        self.blocks.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Seeded block indices, ascending.
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.blocks.keys().copied()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn intent_count(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }
}

fn kross(whole: u128) -> u128 {
    to_base_units(whole, NATIVE_DECIMALS)
}

fn usdt(whole: u128) -> u128 {
    to_base_units(whole, 6)
}

/// The chain's shipped history, in table order.
pub fn builtin_intents() -> Vec<SeededTransferIntent> {
    use SeededTransferIntent as I;
    vec![
        // 2025-07-02
        I::native(1, ZERO_ADDRESS, TREASURY, kross(144_000_000_000), "genesis-tx"),
        // 2025-07-05
        I::native(17_281, TREASURY, ACCOUNT_A, kross(10), "tx-1"),
        I::native(17_281, TREASURY, ACCOUNT_A, kross(1), "tx-2"),
        // 2025-07-11
        I::native(51_841, TREASURY, ACCOUNT_A, kross(1), "tx-3"),
        // 2025-07-28
        I::native(149_761, TREASURY, ACCOUNT_B, kross(1), "tx-4"),
        // 2025-08-11
        I::native(230_401, TREASURY, ACCOUNT_C, kross(10), "tx-5"),
        // 2025-08-20
        I::token(281_601, "USDT", TREASURY, ACCOUNT_A, usdt(10), "usdt-tx-1"),
        I::token(281_601, "USDT", TREASURY, ACCOUNT_A, usdt(1), "usdt-tx-2"),
        // 2025-08-22
        I::token(293_121, "USDT", TREASURY, ACCOUNT_A, usdt(1), "usdt-tx-3"),
        // 2025-09-01
        I::token(350_721, "USDT", TREASURY, ACCOUNT_C, usdt(10), "usdt-tx-4"),
        // 2025-09-05
        I::token(373_761, "USDT", TREASURY, ACCOUNT_C, usdt(10), "usdt-tx-5"),
        // 2025-09-10
        I::token(402_561, "USDT", TREASURY, ACCOUNT_C, usdt(1), "usdt-tx-6"),
        // 2025-09-12
        I::native(414_721, TREASURY, ACCOUNT_A, kross(100), "tx-6"),
        I::native(414_721, TREASURY, ACCOUNT_C, kross(1_000), "tx-7"),
        // 2025-09-28
        I::token(506_241, "USDT", TREASURY, ACCOUNT_B, usdt(1), "usdt-tx-7"),
    ]
}
