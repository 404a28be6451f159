use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::identity::is_address;

const BUILTIN_TOKENS: &str = include_str!("../../fixtures/tokens.json");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("token fixture is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("token {symbol} has malformed contract address {address}")]
    BadAddress { symbol: String, address: String },
    #[error("token symbol {0} is listed twice")]
    DuplicateSymbol(String),
}

/// Metadata for a token contract known to the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub decimals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

#[derive(Deserialize)]
struct TokenList {
    tokens: Vec<TokenInfo>,
}

/// Read-only token lookup table, built once and owned by the synthesizer.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<TokenInfo>,
}

impl TokenRegistry {
    /// Registry parsed from the embedded `fixtures/tokens.json`.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_TOKENS)
    }

    pub fn from_json(raw: &str) -> Result<Self, RegistryError> {
        let list: TokenList = serde_json::from_str(raw)?;
        Self::new(list.tokens)
    }

    pub fn new(tokens: Vec<TokenInfo>) -> Result<Self, RegistryError> {
        for (i, token) in tokens.iter().enumerate() {
            if !is_address(&token.address) {
                return Err(RegistryError::BadAddress {
                    symbol: token.symbol.clone(),
                    address: token.address.clone(),
                });
            }
            if tokens[..i]
                .iter()
                .any(|t| t.symbol.eq_ignore_ascii_case(&token.symbol))
            {
                return Err(RegistryError::DuplicateSymbol(token.symbol.clone()));
            }
        }
        Ok(Self { tokens })
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn all(&self) -> &[TokenInfo] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}
