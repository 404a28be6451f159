//! Read-only query surface over the synthesized chain. Nothing is cached:
//! every call reads the clock once and rebuilds what it needs.

pub mod error;

use log::debug;

use crate::blockchain::clock::index_at_time;
use crate::blockchain::identity::is_hash;
use crate::blockchain::{Block, Clock, NATIVE_SYMBOL, Synthesizer};
use crate::transaction::Transaction;
use crate::wallet::{self, WalletAggregate};

pub use error::ExplorerError;

/// How a caller names a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Latest,
    Number(u64),
}

impl BlockId {
    /// Accepts `latest`/`pending`, `earliest`, `0x`-hex or decimal.
    /// Zero and negative numbers parse (they simply name no block).
    pub fn parse(raw: &str) -> Result<Self, ExplorerError> {
        let raw = raw.trim();
        let invalid = || ExplorerError::InvalidInput("Invalid block number param".into());

        match raw.to_ascii_lowercase().as_str() {
            "latest" | "pending" => return Ok(Self::Latest),
            "earliest" => return Ok(Self::Number(1)),
            _ => {}
        }

        if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            // from_str_radix alone would let a sign through
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            return u64::from_str_radix(digits, 16)
                .map(Self::Number)
                .map_err(|_| invalid());
        }

        match raw.parse::<i128>() {
            Ok(n) if n <= 0 => Ok(Self::Number(0)),
            Ok(n) => u64::try_from(n).map(Self::Number).map_err(|_| invalid()),
            Err(_) => Err(invalid()),
        }
    }
}

/// Aggregate numbers about the chain at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStats {
    pub latest_block: u64,
    pub genesis_timestamp: i64,
    pub block_interval_secs: i64,
    pub native_symbol: &'static str,
    pub seeded_blocks: usize,
    pub seeded_transactions: usize,
    pub tokens: usize,
}

pub struct Explorer {
    synth: Synthesizer,
    clock: Box<dyn Clock>,
}

impl Explorer {
    pub fn new(synth: Synthesizer, clock: Box<dyn Clock>) -> Self {
        Self { synth, clock }
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synth
    }

    /// Index of the block live right now.
    pub fn latest_block_index(&self) -> u64 {
        index_at_time(self.synth.config(), self.clock.now_secs())
    }

    /// Up to `limit` blocks ending at the head, newest first, with full
    /// transactions.
    pub fn latest_blocks(&self, limit: usize) -> Vec<Block> {
        let latest = self.latest_block_index();
        debug!("latest_blocks: head={latest} limit={limit}");
        (1..=latest)
            .rev()
            .take(limit)
            .filter_map(|index| self.synth.block(index, true))
            .collect()
    }

    pub fn block_by_id(&self, id: BlockId, include_full: bool) -> Result<Block, ExplorerError> {
        let index = match id {
            BlockId::Latest => self.latest_block_index(),
            BlockId::Number(n) => n,
        };
        self.synth
            .block(index, include_full)
            .ok_or(ExplorerError::NotFound("Block"))
    }

    /// Parse `raw` as a block identifier and fetch it.
    pub fn block_by_number_or_tag(
        &self,
        raw: &str,
        include_full: bool,
    ) -> Result<Block, ExplorerError> {
        self.block_by_id(BlockId::parse(raw)?, include_full)
    }

    /// Walk back from the head recomputing block hashes until one matches.
    pub fn block_by_hash(&self, hash: &str) -> Result<Block, ExplorerError> {
        let wanted = hash.trim().to_ascii_lowercase();
        if !is_hash(&wanted) {
            return Err(ExplorerError::NotFound("Block"));
        }
        let latest = self.latest_block_index();
        let found = (1..=latest)
            .rev()
            .find(|&index| self.synth.block_hash(index) == wanted);
        debug!("block_by_hash: scanned from {latest}, hit={found:?}");
        found
            .and_then(|index| self.synth.block(index, true))
            .ok_or(ExplorerError::NotFound("Block"))
    }

    /// Seeded transactions, newest block first, table order within a block.
    pub fn latest_transactions(&self, limit: usize) -> Vec<Transaction> {
        self.synth
            .seeds()
            .indices()
            .rev()
            .filter_map(|index| self.synth.block(index, true))
            .flat_map(|block| block.all_transactions)
            .take(limit)
            .collect()
    }

    pub fn transaction_by_hash(&self, hash: &str) -> Result<Transaction, ExplorerError> {
        let wanted = hash.trim().to_ascii_lowercase();
        self.seeded_transactions()
            .find(|tx| tx.hash == wanted)
            .ok_or(ExplorerError::NotFound("Transaction"))
    }

    /// Balance and history for `address`. Never fails: unknown addresses
    /// get an empty aggregate.
    pub fn wallet_aggregate(&self, address: &str) -> WalletAggregate {
        let address = address.trim();
        let agg = wallet::aggregate(
            address,
            self.seeded_transactions(),
            self.synth.config().genesis_timestamp,
        );
        debug!(
            "wallet_aggregate: {} -> {} txs, balance {}",
            address,
            agg.transactions.len(),
            agg.native_balance_formatted
        );
        agg
    }

    pub fn chain_stats(&self) -> ChainStats {
        let cfg = self.synth.config();
        ChainStats {
            latest_block: self.latest_block_index(),
            genesis_timestamp: cfg.genesis_timestamp,
            block_interval_secs: cfg.block_interval_secs,
            native_symbol: NATIVE_SYMBOL,
            seeded_blocks: self.synth.seeds().block_count(),
            seeded_transactions: self.synth.seeds().intent_count(),
            tokens: self.synth.tokens().len(),
        }
    }

    /// Every seeded transaction in ascending block order.
    fn seeded_transactions(&self) -> impl Iterator<Item = Transaction> + '_ {
        self.synth
            .seeds()
            .indices()
            .filter_map(|index| self.synth.block(index, true))
            .flat_map(|block| block.all_transactions)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::blockchain::clock::time_for_index;
    use crate::blockchain::{ChainConfig, FixedClock};
    use crate::transaction::{SeededTransferIntent, TokenRegistry, builtin_intents};

    pub(crate) const TREASURY: &str = "0xB9ff77d1a6b9802C32632298eB5CC2FDb278049b";
    const ACCOUNT_A: &str = "0xaC5aBDb1eBA4376992acbd681484e17347B667e3";
    const ACCOUNT_B: &str = "0x4E8D4C2cA158d02Ed812F56B25b421c7f0B3d727";

    /// Default chain with the clock pinned inside block `head`.
    pub(crate) fn explorer_at(head: u64) -> Explorer {
        explorer_with(builtin_intents(), head, 7)
    }

    /// Chain over `intents` with the clock `offset` seconds into block `head`.
    fn explorer_with(intents: Vec<SeededTransferIntent>, head: u64, offset: i64) -> Explorer {
        let tokens = TokenRegistry::builtin().expect("fixture parses");
        let cfg = ChainConfig::default();
        let now = time_for_index(&cfg, head) + offset;
        let synth = Synthesizer::new(cfg, intents, tokens).expect("valid table");
        Explorer::new(synth, Box::new(FixedClock(now)))
    }

    #[test]
    fn latest_index_follows_clock() {
        assert_eq!(explorer_at(600_000).latest_block_index(), 600_000);
        let before_genesis = Explorer::new(
            explorer_at(1).synth,
            Box::new(FixedClock(1_751_414_399)),
        );
        assert_eq!(before_genesis.latest_block_index(), 0);
        assert!(before_genesis.latest_blocks(5).is_empty());
    }

    #[test]
    fn latest_blocks_descend_and_stop_at_one() {
        let ex = explorer_at(600_000);
        let blocks = ex.latest_blocks(5);
        let numbers: Vec<u64> = blocks.iter().map(|b| b.index).collect();
        assert_eq!(numbers, [600_000, 599_999, 599_998, 599_997, 599_996]);

        let early = explorer_at(3);
        let numbers: Vec<u64> = early.latest_blocks(10).iter().map(|b| b.index).collect();
        assert_eq!(numbers, [3, 2, 1]);
        assert!(early.latest_blocks(0).is_empty());
    }

    #[test]
    fn block_id_parsing() {
        assert_eq!(BlockId::parse("latest"), Ok(BlockId::Latest));
        assert_eq!(BlockId::parse("pending"), Ok(BlockId::Latest));
        assert_eq!(BlockId::parse("earliest"), Ok(BlockId::Number(1)));
        assert_eq!(BlockId::parse("0x10"), Ok(BlockId::Number(16)));
        assert_eq!(BlockId::parse("0XfF"), Ok(BlockId::Number(255)));
        assert_eq!(BlockId::parse("17281"), Ok(BlockId::Number(17_281)));
        assert_eq!(BlockId::parse(" 42 "), Ok(BlockId::Number(42)));
        assert_eq!(BlockId::parse("-3"), Ok(BlockId::Number(0)));
        for bad in ["0x", "0x+5", "0x-5", "0x 5"] {
            assert!(
                matches!(BlockId::parse(bad), Err(ExplorerError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            BlockId::parse("0xzz"),
            Err(ExplorerError::InvalidInput(_))
        ));
        assert!(matches!(
            BlockId::parse("tip"),
            Err(ExplorerError::InvalidInput(_))
        ));
    }

    #[test]
    fn latest_tag_matches_head() {
        let ex = explorer_at(512_345);
        let block = ex.block_by_number_or_tag("latest", true).expect("head block");
        assert_eq!(block.index, ex.latest_block_index());
    }

    #[test]
    fn block_by_number_edge_cases() {
        let ex = explorer_at(600_000);
        assert_eq!(
            ex.block_by_number_or_tag("0", true),
            Err(ExplorerError::NotFound("Block"))
        );
        assert_eq!(
            ex.block_by_number_or_tag("-1", true),
            Err(ExplorerError::NotFound("Block"))
        );
        assert!(matches!(
            ex.block_by_number_or_tag("abc", true),
            Err(ExplorerError::InvalidInput(_))
        ));
        let by_hex = ex.block_by_number_or_tag("0x4381", false).expect("block");
        assert_eq!(by_hex.index, 17_281);
        assert_eq!(by_hex.tx_count(), 2);
    }

    #[test]
    fn block_by_hash_scans_history() {
        let ex = explorer_at(2_000);
        let target = ex.synthesizer().block_hash(1_234);
        let block = ex.block_by_hash(&target).expect("found");
        assert_eq!(block.index, 1_234);
        let upper = format!("0x{}", target[2..].to_uppercase());
        assert_eq!(ex.block_by_hash(&upper).map(|b| b.index), Ok(1_234));
    }

    #[test]
    fn block_by_hash_misses_outside_range() {
        let ex = explorer_at(2_000);
        let future = ex.synthesizer().block_hash(2_001);
        assert_eq!(
            ex.block_by_hash(&future),
            Err(ExplorerError::NotFound("Block"))
        );
        assert_eq!(
            ex.block_by_hash(crate::blockchain::identity::ZERO_HASH),
            Err(ExplorerError::NotFound("Block"))
        );
        assert_eq!(
            ex.block_by_hash("not-a-hash"),
            Err(ExplorerError::NotFound("Block"))
        );
    }

    #[test]
    fn latest_transactions_newest_block_first() {
        let ex = explorer_at(600_000);
        let txs = ex.latest_transactions(100);
        assert_eq!(txs.len(), 15);
        assert_eq!(txs[0].block_index, 506_241);
        assert_eq!(txs.last().map(|t| t.block_index), Some(1));
        assert!(txs.windows(2).all(|w| w[0].block_index >= w[1].block_index));

        let pair: Vec<u64> = txs
            .iter()
            .filter(|t| t.block_index == 414_721)
            .map(|t| t.transaction_index)
            .collect();
        assert_eq!(pair, [0, 1]);

        assert_eq!(ex.latest_transactions(3).len(), 3);
        assert!(ex.latest_transactions(0).is_empty());
    }

    #[test]
    fn transaction_lookup() {
        let ex = explorer_at(600_000);
        let any = ex.latest_transactions(4).pop().expect("some tx");
        let found = ex.transaction_by_hash(&any.hash).expect("found");
        assert_eq!(found, any);
        assert_eq!(
            ex.transaction_by_hash(crate::blockchain::identity::ZERO_HASH),
            Err(ExplorerError::NotFound("Transaction"))
        );
    }

    #[test]
    fn single_credit_wallet() {
        let value = 5_000_000_000_000_000_000u128;
        let ex = explorer_with(
            vec![
                SeededTransferIntent::native(1, TREASURY, ACCOUNT_A, 1, "warmup"),
                SeededTransferIntent::native(9, TREASURY, ACCOUNT_B, value, "only"),
            ],
            10,
            0,
        );
        let agg = ex.wallet_aggregate(ACCOUNT_B);
        assert_eq!(agg.native_balance, value as i128);
        assert_eq!(agg.native_balance_formatted, "5.0000");
        assert_eq!(agg.transactions.len(), 1);
        assert_eq!(agg.first_activity_timestamp, 1_751_414_400 + 8 * 15);
    }

    #[test]
    fn builtin_wallets() {
        let ex = explorer_at(600_000);

        let b = ex.wallet_aggregate(&ACCOUNT_B.to_lowercase());
        assert_eq!(b.native_balance_formatted, "1.0000");
        assert_eq!(b.transactions.len(), 2);
        assert_eq!(b.transactions[0].block_index, 506_241);
        assert_eq!(b.token_balances.len(), 1);
        assert_eq!(b.token_balances[0].balance, 1_000_000);

        let a = ex.wallet_aggregate(ACCOUNT_A);
        assert_eq!(a.native_balance_formatted, "112.0000");
        assert_eq!(a.token_balances[0].formatted, "12.000000");

        let treasury = ex.wallet_aggregate(TREASURY);
        assert_eq!(treasury.native_balance_formatted, "143999998877.0000");
        assert_eq!(treasury.first_activity_timestamp, 1_751_414_400);
        assert_eq!(treasury.transactions.len(), 15);

        let nobody = ex.wallet_aggregate("0x1111111111111111111111111111111111111111");
        assert!(nobody.transactions.is_empty());
        assert_eq!(nobody.first_activity_timestamp, 1_751_414_400);
    }

    #[test]
    fn stats_reflect_table() {
        let stats = explorer_at(42).chain_stats();
        assert_eq!(stats.latest_block, 42);
        assert_eq!(stats.seeded_blocks, 12);
        assert_eq!(stats.seeded_transactions, 15);
        assert_eq!(stats.tokens, 1);
        assert_eq!(stats.block_interval_secs, 15);
    }
}
