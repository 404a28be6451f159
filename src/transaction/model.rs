use serde::Serialize;

/// Kind of a synthesized transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    Transfer,
    TokenTransfer,
}

/// Execution outcome. Failures are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    Successful,
}

/// Token movement carried by a `token_transfer` transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub contract: String,
    pub symbol: String,
    pub raw_value: u128,
    pub decimals: u32,
    pub formatted_value: String,
}

/// A transaction derived from one seeded transfer intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: String,
    /// Position within the block.
    pub nonce: u64,
    pub block_hash: String,
    pub block_index: u64,
    pub transaction_index: u64,
    pub timestamp: i64,
    pub from: String,
    pub to: String,
    /// Native value in wei; zero for token transfers.
    pub value: u128,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub kind: TxType,
    pub status: TxStatus,
    pub token_transfer: Option<TokenTransfer>,
}

impl Transaction {
    /// Case-insensitive sender match.
    pub fn is_from(&self, address: &str) -> bool {
        self.from.eq_ignore_ascii_case(address)
    }

    pub fn is_to(&self, address: &str) -> bool {
        self.to.eq_ignore_ascii_case(address)
    }
}
