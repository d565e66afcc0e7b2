use route_server::config::ServerConfig;
use route_server::timetable::Timetable;
use route_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(2);
        }
    };

    // Seed the timetable (fail fast if the file is unusable)
    let timetable = match &config.timetable_path {
        Some(path) => match Timetable::load_json(path).await {
            Ok(timetable) => timetable,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load timetable");
                std::process::exit(1);
            }
        },
        None => {
            warn!("TIMETABLE_PATH not set, starting with an empty timetable");
            Timetable::new()
        }
    };

    let state = AppState::new(timetable, config.search.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.bind_addr, "Route server listening");
    info!("  GET  /health                 - Health check");
    info!("  GET  /api/v1/trains          - List legs");
    info!("  POST /api/v1/trains/create   - Add a leg");
    info!("  POST /api/v1/routes/optimal  - Find ranked routes");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
