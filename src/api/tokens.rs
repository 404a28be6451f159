use actix_web::{HttpResponse, Responder, get, web};

use super::models::{ApiResponse, AppState, TokensResponse};

#[get("/tokens/")]
pub async fn get_tokens(state: web::Data<AppState>) -> impl Responder {
    let tokens = state.explorer.synthesizer().tokens().all();
    HttpResponse::Ok().json(ApiResponse::ok(TokensResponse { tokens }))
}
