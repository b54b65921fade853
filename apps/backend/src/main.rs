use actix_web::{web, App, HttpServer};
use rummy_backend::middleware::RequestLog;
use rummy_backend::telemetry::{self, LogFormat};
use rummy_backend::{routes, AppState, RoomConfig, ServerConfig};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let log_format = LogFormat::from_env();
    telemetry::init_tracing(log_format.as_ref().copied().unwrap_or_default());
    if let Err(e) = log_format {
        warn!(error = %e, "falling back to JSON logs");
    }

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let room_config = match RoomConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid room configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %server_config.host,
        port = server_config.port,
        seats = room_config.seats,
        turn_seconds = room_config.turn_seconds,
        show_hands = room_config.show_hands,
        "starting rummy backend"
    );

    let data = web::Data::new(AppState::new(room_config));

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
