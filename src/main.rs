mod api;
mod blockchain;
mod explorer;
mod transaction;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::env;
use std::io;

use api::AppState;
use blockchain::{ChainConfig, Synthesizer, SystemClock};
use explorer::Explorer;
use transaction::{TokenRegistry, builtin_intents};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    let config = ChainConfig::from_env();
    let tokens = TokenRegistry::builtin().map_err(io::Error::other)?;
    let synth = Synthesizer::new(config, builtin_intents(), tokens).map_err(io::Error::other)?;
    let (config, seeds) = (synth.config(), synth.seeds());
    info!(
        "chain seed={} genesis={} interval={}s, {} seeded transfers in {} blocks",
        config.chain_seed,
        config.genesis_timestamp,
        config.block_interval_secs,
        seeds.intent_count(),
        seeds.block_count()
    );

    let explorer = Explorer::new(synth, Box::new(SystemClock));
    println!("⛓️ Starting ledger explorer API at http://{host}:{port}");

    let state = web::Data::new(AppState { explorer });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
