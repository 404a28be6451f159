use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, warn};

use super::models::{ApiResponse, AppState, BlockQuery, BlockResponse, LimitQuery};
use super::{DEFAULT_BLOCK_PAGE, page_limit};
use crate::explorer::ExplorerError;

/// Number of the block live right now.
#[get("/blocks/latest-number/")]
pub async fn get_latest_block_number(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.explorer.latest_block_index())
}

/// Most recent blocks, newest first, with full transactions.
#[get("/blocks/")]
pub async fn get_latest_blocks(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    let limit = page_limit(query.limit, DEFAULT_BLOCK_PAGE);
    let blocks = state.explorer.latest_blocks(limit);
    debug!("GET /blocks/ - limit={} returned={}", limit, blocks.len());
    let data: Vec<BlockResponse> = blocks.iter().map(BlockResponse::from).collect();
    HttpResponse::Ok().json(ApiResponse::ok(data))
}

/// Look a block up by hash. The scan walks the whole history, so it runs
/// on the blocking pool.
#[get("/blocks/hash/{hash}/")]
pub async fn get_block_by_hash(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> actix_web::Result<HttpResponse> {
    let hash = path.into_inner().0;
    let scan_state = state.clone();
    let scan_hash = hash.clone();
    let found = web::block(move || scan_state.explorer.block_by_hash(&scan_hash)).await?;
    match found {
        Ok(block) => Ok(HttpResponse::Ok().json(ApiResponse::ok(BlockResponse::from(&block)))),
        Err(err) => {
            warn!("GET /blocks/hash/{hash}/ - {err}");
            Err(err.into())
        }
    }
}

/// Block by number (`latest`, `earliest`, `0x`-hex or decimal).
/// `?full=false` returns transaction hashes only.
#[get("/blocks/{id}/")]
pub async fn get_block_by_number(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
    query: web::Query<BlockQuery>,
) -> Result<HttpResponse, ExplorerError> {
    let id = path.into_inner().0;
    let include_full = query.full.unwrap_or(true);
    let block = state
        .explorer
        .block_by_number_or_tag(&id, include_full)
        .inspect_err(|err| warn!("GET /blocks/{id}/ - {err}"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BlockResponse::from(&block))))
}
