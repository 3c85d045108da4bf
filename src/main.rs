#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::{web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use utoipa_actix_web::AppExt;
use zorphix_admin::auth::{FirebaseConfig, ServerConfig};
use zorphix_admin::{api, AppState, StartupError};

fn startup_failure(e: StartupError) -> std::io::Error {
    error!("Startup failed: {}", e);
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let firebase_cfg = FirebaseConfig::from_env()
        .map_err(StartupError::from)
        .map_err(startup_failure)?;
    let server_cfg = ServerConfig::from_env()
        .map_err(StartupError::from)
        .map_err(startup_failure)?;
    let state = AppState::new(&firebase_cfg).map_err(startup_failure)?;

    info!(
        "Starting server at http://{}:{}",
        server_cfg.host, server_cfg.port
    );

    HttpServer::new(move || {
        let (app, openapi) = App::new()
            .app_data(api::app_data(&state))
            .app_data(api::json_config())
            .into_utoipa_app()
            .configure(api::configure)
            .split_for_parts();
        app.route(
            "/api-docs/openapi.json",
            web::get().to(move || {
                let openapi = openapi.clone();
                async move { HttpResponse::Ok().json(openapi) }
            }),
        )
        .wrap(state.auth_layer())
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await
}
