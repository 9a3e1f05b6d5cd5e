use actix_files as fs;
use actix_web::{web, Result};

use crate::config::ServerConfig;
use crate::state::AppState;

/// HTTP handler for the index page
pub async fn index(app_state: web::Data<AppState>) -> Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(app_state.config.index_file()).await?)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &ServerConfig) {
    cfg.service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", config.static_dir.clone()));
}
