mod chain;
mod health;
pub mod models;
mod stats;
mod tokens;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, error::QueryPayloadError};
use log::warn;

use crate::explorer::ExplorerError;

pub use models::AppState;

pub const DEFAULT_BLOCK_PAGE: usize = 5;
pub const DEFAULT_TX_PAGE: usize = 20;
pub const MAX_PAGE: usize = 100;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .service(health::health_check)
            // fixed paths before `/blocks/{id}/`
            .service(chain::get_latest_block_number)
            .service(chain::get_latest_blocks)
            .service(chain::get_block_by_hash)
            .service(chain::get_block_by_number)
            .service(tx::get_latest_transactions)
            .service(tx::get_transaction_by_hash)
            .service(wallet::get_wallet_details)
            .service(tokens::get_tokens)
            .service(stats::get_stats),
    );
}

/// Malformed query strings get the same failure envelope as everything else.
fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("{} {} - {}", req.method(), req.uri(), err);
    ExplorerError::InvalidInput(err.to_string()).into()
}

fn page_limit(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).min(MAX_PAGE)
}
