pub mod model;
pub mod seeded;
pub mod token;
pub mod units;

pub use model::{TokenTransfer, Transaction, TxStatus, TxType};
pub use seeded::{SeedError, SeedTable, SeededTransferIntent, TransferKind, builtin_intents};
pub use token::{TokenInfo, TokenRegistry};
