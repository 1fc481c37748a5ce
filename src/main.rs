use actix_web::HttpServer;
use tracing::{error, info};
use travel_gateway::{AppState, ServerConfig, build_info, create_app, init_logging};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let server = ServerConfig::from_env();
    init_logging(server.log_format);

    let state = match AppState::from_env(&server) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to start gateway");
            return Err(std::io::Error::other(e));
        }
    };

    info!(
        host = %server.host,
        port = server.port,
        version = build_info::VERSION,
        commit = build_info::GIT_SHA,
        database = %server.database_path,
        "Starting travel gateway"
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind((server.host.as_str(), server.port))?
        .run()
        .await
}
