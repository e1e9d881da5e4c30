use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};

use quiz_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Refusing to start: {}", err);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(err) => {
            log::error!("Failed to initialise application state: {}", err);
            std::process::exit(1);
        }
    };

    let bind_addr = (
        state.config.web_server_host.clone(),
        state.config.web_server_port,
    );
    log::info!("Starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(|cfg| handlers::configure(cfg, state))
    })
    .bind(bind_addr)?
    .run()
    .await
}
