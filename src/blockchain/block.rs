use crate::transaction::Transaction;

/// Transactions as returned to callers: full records or just their hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTransactions {
    Full(Vec<Transaction>),
    Hashes(Vec<String>),
}

/// A synthesized block. Every field is a pure function of the index, the
/// chain config and the seed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub index: u64,
    pub hash: String,
    pub parent_hash: String,
    pub nonce: String,
    pub miner: String,
    pub difficulty: u64,
    /// `difficulty * index`
    pub total_difficulty: u128,
    pub size: u64,
    pub gas_limit: u64,
    /// Sum of gas over the contained transactions.
    pub gas_used: u64,
    pub timestamp: i64,
    pub transactions: BlockTransactions,
    /// Full records regardless of how `transactions` is shaped.
    pub all_transactions: Vec<Transaction>,
}

impl Block {
    pub fn tx_count(&self) -> usize {
        self.all_transactions.len()
    }

    /// Same block with `transactions` holding the full records.
    pub fn with_full_transactions(mut self) -> Self {
        self.transactions = BlockTransactions::Full(self.all_transactions.clone());
        self
    }

    /// Same block with `transactions` reduced to hashes.
    pub fn with_transaction_hashes(mut self) -> Self {
        self.transactions = BlockTransactions::Hashes(
            self.all_transactions.iter().map(|t| t.hash.clone()).collect(),
        );
        self
    }
}
