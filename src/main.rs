use actix_web::{middleware, web, App, HttpServer};
use log::info;

mod chat;
mod config;
mod error;
mod game;
mod lobby;
mod models;
mod routes;
mod session;
mod state;
mod websocket;

use config::ServerConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::default();
    let bind_address = config.bind_address();
    info!(
        "Starting tic-tac-toe lobby at http://{}:{}",
        bind_address.0, bind_address.1
    );

    // Create shared application state
    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        let config = app_state.config.clone();
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(|cfg| routes::configure_routes(cfg, &config))
    })
    .bind(bind_address)?
    .run()
    .await
}
