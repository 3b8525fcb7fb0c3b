use actix::Actor;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use signal_api::{
    actors::signal_server::SignalServer,
    directory::{NullUserDirectory, UserDirectory},
    lobby,
    models::AppState,
};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let directory: Arc<dyn UserDirectory> = Arc::new(NullUserDirectory);
    let signal = SignalServer::new(directory).start();

    let port = std::env::var("SIGNAL_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    info!("starting signal server on port {port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(AppState {
                signal: signal.clone(),
            }))
            .wrap(cors)
            .service(lobby::ws_connect)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
