//! Wallet view rebuilt by replaying every synthesized transaction.

use chrono::{DateTime, SecondsFormat};

use crate::blockchain::NATIVE_DECIMALS;
use crate::transaction::units::format_fixed;
use crate::transaction::Transaction;

/// Decimal places shown for the native balance.
pub const BALANCE_DISPLAY_PLACES: u32 = 4;

/// Net position in one token, in its smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub contract: String,
    pub symbol: String,
    pub decimals: u32,
    pub balance: i128,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAggregate {
    pub address: String,
    /// Signed sum in wei: credits on `to`, debits on `from`.
    pub native_balance: i128,
    pub native_balance_formatted: String,
    pub first_activity_timestamp: i64,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub token_balances: Vec<TokenBalance>,
}

impl WalletAggregate {
    /// `first_activity_timestamp` as RFC 3339 with millisecond precision.
    pub fn creation_date(&self) -> String {
        DateTime::from_timestamp(self.first_activity_timestamp, 0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default()
    }
}

/// Replay `transactions` for `address`. Matching ignores hex case; unknown
/// addresses get an empty history anchored at `genesis_timestamp`.
pub fn aggregate<I>(address: &str, transactions: I, genesis_timestamp: i64) -> WalletAggregate
where
    I: IntoIterator<Item = Transaction>,
{
    let mut native_balance: i128 = 0;
    let mut token_balances: Vec<TokenBalance> = Vec::new();
    let mut history: Vec<Transaction> = Vec::new();

    for tx in transactions {
        let (incoming, outgoing) = (tx.is_to(address), tx.is_from(address));
        if !incoming && !outgoing {
            continue;
        }

        let value = signed(tx.value);
        if incoming {
            native_balance = native_balance.saturating_add(value);
        }
        if outgoing {
            native_balance = native_balance.saturating_sub(value);
        }

        if let Some(token) = &tx.token_transfer {
            let idx = match token_balances
                .iter()
                .position(|b| b.contract.eq_ignore_ascii_case(&token.contract))
            {
                Some(idx) => idx,
                None => {
                    token_balances.push(TokenBalance {
                        contract: token.contract.clone(),
                        symbol: token.symbol.clone(),
                        decimals: token.decimals,
                        balance: 0,
                        formatted: String::new(),
                    });
                    token_balances.len() - 1
                }
            };
            let entry = &mut token_balances[idx];
            let amount = signed(token.raw_value);
            if incoming {
                entry.balance = entry.balance.saturating_add(amount);
            }
            if outgoing {
                entry.balance = entry.balance.saturating_sub(amount);
            }
        }

        history.push(tx);
    }

    for entry in &mut token_balances {
        entry.formatted = format_fixed(entry.balance, entry.decimals, entry.decimals);
    }

    let first_activity_timestamp = history
        .iter()
        .map(|t| t.timestamp)
        .min()
        .unwrap_or(genesis_timestamp);

    // stable: same-block transactions keep table order
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    WalletAggregate {
        address: address.to_string(),
        native_balance,
        native_balance_formatted: format_fixed(
            native_balance,
            NATIVE_DECIMALS,
            BALANCE_DISPLAY_PLACES,
        ),
        first_activity_timestamp,
        transactions: history,
        token_balances,
    }
}

fn signed(value: u128) -> i128 {
    i128::try_from(value).unwrap_or(i128::MAX)
}
