use actix_web::{HttpResponse, Responder, get, web};
use log::info;

use super::models::{ApiResponse, AppState, WalletResponse};

/// Balance and history rebuilt from the seeded transfers. Unknown
/// addresses get an empty wallet, never a 404.
#[get("/wallets/{address}/")]
pub async fn get_wallet_details(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let address = path.into_inner().0;
    let agg = state.explorer.wallet_aggregate(&address);
    info!(
        "GET /wallets/{}/ - {} txs, balance {}",
        address,
        agg.transactions.len(),
        agg.native_balance_formatted
    );
    HttpResponse::Ok().json(ApiResponse::ok(WalletResponse::from(&agg)))
}
