use super::block::{Block, BlockTransactions};
use super::clock::time_for_index;
use super::identity::{self, ZERO_HASH};
use super::{
    BLOCK_GAS_LIMIT, ChainConfig, DIFFICULTY_FLOOR, DIFFICULTY_SPREAD, SIZE_FLOOR, SIZE_SPREAD,
    TX_GAS, TX_GAS_PRICE,
};
use crate::transaction::units::format_units;
use crate::transaction::{
    SeedError, SeedTable, SeededTransferIntent, TokenRegistry, TokenTransfer, Transaction, TransferKind,
    TxStatus, TxType,
};

/// Rebuilds blocks and transactions on demand from the chain config and
/// the seeded history. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: ChainConfig,
    seeds: SeedTable,
    tokens: TokenRegistry,
}

impl Synthesizer {
    /// Index `intents` against `tokens`, the registry this synthesizer
    /// resolves token transfers with.
    pub fn new(
        config: ChainConfig,
        intents: Vec<SeededTransferIntent>,
        tokens: TokenRegistry,
    ) -> Result<Self, SeedError> {
        let seeds = SeedTable::new(intents, &tokens)?;
        Ok(Self {
            config,
            seeds,
            tokens,
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn seeds(&self) -> &SeedTable {
        &self.seeds
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// Hash of block `index` without building the rest of the block.
    pub fn block_hash(&self, index: u64) -> String {
        identity::block_hash(&self.config.chain_seed, index)
    }

    /// Derive block `index`. `None` for index 0 (no such block).
    pub fn block(&self, index: u64, include_full_transactions: bool) -> Option<Block> {
        if index < 1 {
            return None;
        }

        let seed = identity::block_seed(&self.config.chain_seed, index);
        let hash = identity::digest(&seed);
        let parent_hash = if index == 1 {
            ZERO_HASH.to_string()
        } else {
            self.block_hash(index - 1)
        };
        let difficulty = identity::bounded(&seed, "difficulty", DIFFICULTY_SPREAD) + DIFFICULTY_FLOOR;
        let size = SIZE_FLOOR + identity::bounded(&seed, "size", SIZE_SPREAD);
        let timestamp = time_for_index(&self.config, index);

        let all_transactions: Vec<Transaction> = self
            .seeds
            .get(index)
            .iter()
            .enumerate()
            .map(|(i, intent)| self.transaction(&seed, &hash, timestamp, i as u64, intent))
            .collect();
        let gas_used = TX_GAS * all_transactions.len() as u64;

        let block = Block {
            index,
            hash,
            parent_hash,
            nonce: identity::block_nonce(&seed),
            miner: identity::miner_address(&seed),
            difficulty,
            total_difficulty: u128::from(difficulty) * u128::from(index),
            size,
            gas_limit: BLOCK_GAS_LIMIT,
            gas_used,
            timestamp,
            transactions: BlockTransactions::Hashes(Vec::new()),
            all_transactions,
        };

        Some(if include_full_transactions {
            block.with_full_transactions()
        } else {
            block.with_transaction_hashes()
        })
    }

    fn transaction(
        &self,
        block_seed: &str,
        block_hash: &str,
        timestamp: i64,
        position: u64,
        intent: &SeededTransferIntent,
    ) -> Transaction {
        let (kind, value, token_transfer) = match &intent.kind {
            TransferKind::Native => (TxType::Transfer, intent.raw_value, None),
            TransferKind::Token { symbol } => {
                // `new` rejects symbols missing from `self.tokens`.
                let transfer = self.tokens.by_symbol(symbol).map(|token| TokenTransfer {
                    contract: token.address.clone(),
                    symbol: token.symbol.clone(),
                    raw_value: intent.raw_value,
                    decimals: token.decimals,
                    formatted_value: format_units(intent.raw_value, token.decimals),
                });
                (TxType::TokenTransfer, 0, transfer)
            }
        };

        Transaction {
            hash: identity::tx_hash(block_seed, &intent.unique_seed),
            nonce: position,
            block_hash: block_hash.to_string(),
            block_index: intent.block_index,
            transaction_index: position,
            timestamp,
            from: intent.from.clone(),
            to: intent.to.clone(),
            value,
            gas_limit: TX_GAS,
            gas_price: TX_GAS_PRICE,
            kind,
            status: TxStatus::Successful,
            token_transfer,
        }
    }
}
