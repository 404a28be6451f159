use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, BlockTransactions};
use crate::explorer::{ChainStats, Explorer};
use crate::transaction::units::to_quantity;
use crate::transaction::{TokenInfo, TokenTransfer, Transaction, TxStatus, TxType};
use crate::wallet::{TokenBalance, WalletAggregate};

/// Shared application state: the read-only explorer.
pub struct AppState {
    pub explorer: Explorer,
}

/* ---------- Envelope ---------- */

/// `{ success, data }` on success, `{ success: false, message }` otherwise.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/* ---------- Query params ---------- */

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct BlockQuery {
    pub full: Option<bool>,
}

/* ---------- Block / Transaction wire shapes ---------- */

#[derive(Serialize)]
#[serde(untagged)]
pub enum TransactionsField {
    Full(Vec<TransactionResponse>),
    Hashes(Vec<String>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub number: String,
    pub block_number: u64,
    pub hash: String,
    pub parent_hash: String,
    pub nonce: String,
    pub miner: String,
    pub difficulty: String,
    pub total_difficulty: String,
    pub size: u64,
    pub gas_limit: String,
    pub gas_used: u64,
    pub timestamp: i64,
    pub transactions: TransactionsField,
    pub tx_count: usize,
    pub uncles: Vec<String>,
}

impl From<&Block> for BlockResponse {
    fn from(b: &Block) -> Self {
        let transactions = match &b.transactions {
            BlockTransactions::Full(txs) => {
                TransactionsField::Full(txs.iter().map(TransactionResponse::from).collect())
            }
            BlockTransactions::Hashes(hashes) => TransactionsField::Hashes(hashes.clone()),
        };
        Self {
            number: to_quantity(u128::from(b.index)),
            block_number: b.index,
            hash: b.hash.clone(),
            parent_hash: b.parent_hash.clone(),
            nonce: b.nonce.clone(),
            miner: b.miner.clone(),
            difficulty: to_quantity(u128::from(b.difficulty)),
            total_difficulty: to_quantity(b.total_difficulty),
            size: b.size,
            gas_limit: to_quantity(u128::from(b.gas_limit)),
            gas_used: b.gas_used,
            timestamp: b.timestamp,
            transactions,
            tx_count: b.tx_count(),
            uncles: Vec::new(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransferResponse {
    pub contract: String,
    pub symbol: String,
    pub value: String,
    pub decimals: u32,
    pub value_formatted: String,
}

impl From<&TokenTransfer> for TokenTransferResponse {
    fn from(t: &TokenTransfer) -> Self {
        Self {
            contract: t.contract.clone(),
            symbol: t.symbol.clone(),
            value: to_quantity(t.raw_value),
            decimals: t.decimals,
            value_formatted: t.formatted_value.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub hash: String,
    pub timestamp: i64,
    pub nonce: String,
    pub block_hash: String,
    pub block_number: String,
    pub transaction_index: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
    pub input: String,
    #[serde(rename = "type")]
    pub kind: TxType,
    pub status: TxStatus,
    pub gas_used: u64,
    pub token_transfer: Option<TokenTransferResponse>,
}

impl From<&Transaction> for TransactionResponse {
    fn from(t: &Transaction) -> Self {
        Self {
            hash: t.hash.clone(),
            timestamp: t.timestamp,
            nonce: to_quantity(u128::from(t.nonce)),
            block_hash: t.block_hash.clone(),
            block_number: to_quantity(u128::from(t.block_index)),
            transaction_index: to_quantity(u128::from(t.transaction_index)),
            from: t.from.clone(),
            to: t.to.clone(),
            value: to_quantity(t.value),
            gas: to_quantity(u128::from(t.gas_limit)),
            gas_price: to_quantity(t.gas_price),
            input: "0x".to_string(),
            kind: t.kind,
            status: t.status,
            gas_used: t.gas_limit,
            token_transfer: t.token_transfer.as_ref().map(TokenTransferResponse::from),
        }
    }
}

/* ---------- Wallet ---------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceResponse {
    pub contract: String,
    pub symbol: String,
    pub decimals: u32,
    pub balance: String,
    pub balance_formatted: String,
}

impl From<&TokenBalance> for TokenBalanceResponse {
    fn from(b: &TokenBalance) -> Self {
        Self {
            contract: b.contract.clone(),
            symbol: b.symbol.clone(),
            decimals: b.decimals,
            balance: b.balance.to_string(),
            balance_formatted: b.formatted.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub address: String,
    pub balance: String,
    pub balance_raw: String,
    pub first_activity_timestamp: i64,
    pub creation_date: String,
    pub transactions: Vec<TransactionResponse>,
    pub token_balances: Vec<TokenBalanceResponse>,
}

impl From<&WalletAggregate> for WalletResponse {
    fn from(w: &WalletAggregate) -> Self {
        Self {
            address: w.address.clone(),
            balance: w.native_balance_formatted.clone(),
            balance_raw: w.native_balance.to_string(),
            first_activity_timestamp: w.first_activity_timestamp,
            creation_date: w.creation_date(),
            transactions: w.transactions.iter().map(TransactionResponse::from).collect(),
            token_balances: w.token_balances.iter().map(TokenBalanceResponse::from).collect(),
        }
    }
}

/* ---------- Tokens / Stats ---------- */

#[derive(Serialize)]
pub struct TokensResponse<'a> {
    pub tokens: &'a [TokenInfo],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub latest_block: u64,
    pub genesis_timestamp: i64,
    pub block_interval_secs: i64,
    pub native_symbol: &'static str,
    pub seeded_blocks: usize,
    pub seeded_transactions: usize,
    pub tokens: usize,
}

impl From<ChainStats> for StatsResponse {
    fn from(s: ChainStats) -> Self {
        Self {
            latest_block: s.latest_block,
            genesis_timestamp: s.genesis_timestamp,
            block_interval_secs: s.block_interval_secs,
            native_symbol: s.native_symbol,
            seeded_blocks: s.seeded_blocks,
            seeded_transactions: s.seeded_transactions,
            tokens: s.tokens,
        }
    }
}
