use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, warn};

use super::models::{ApiResponse, AppState, LimitQuery, TransactionResponse};
use super::{DEFAULT_TX_PAGE, page_limit};
use crate::explorer::ExplorerError;

/// Seeded transactions, newest block first.
#[get("/txs/")]
pub async fn get_latest_transactions(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    let limit = page_limit(query.limit, DEFAULT_TX_PAGE);
    let txs = state.explorer.latest_transactions(limit);
    debug!("GET /txs/ - limit={} returned={}", limit, txs.len());
    let data: Vec<TransactionResponse> = txs.iter().map(TransactionResponse::from).collect();
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

#[get("/txs/{hash}/")]
pub async fn get_transaction_by_hash(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, ExplorerError> {
    let hash = path.into_inner().0;
    let tx = state
        .explorer
        .transaction_by_hash(&hash)
        .inspect_err(|err| warn!("GET /txs/{hash}/ - {err}"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(TransactionResponse::from(&tx))))
}
