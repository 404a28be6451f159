use actix_web::{HttpResponse, Responder, get, web};

use super::models::{ApiResponse, AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let stats = state.explorer.chain_stats();
    HttpResponse::Ok().json(ApiResponse::ok(StatsResponse::from(stats)))
}
