use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, Subscriber};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};

mod api;
mod auth;
mod config;
mod db;
mod shutdown;

use crate::api::state::AppState;
use crate::auth::{CookieSettings, TokenSigner};
use crate::db::DocumentStore;
use crate::shutdown::ShutdownCoordinator;

/// Daily rotating file receiving events at `level` and above
fn file_layer<S>(log_dir: &str, file_name: &str, level: LevelFilter) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, file_name))
        .with_ansi(false)
        .with_filter(level)
}

/// Console output plus per-level log files under `log_dir`
fn init_tracing(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    // Log files will be created as: logs/info.log.2024-12-22, logs/error.log.2024-12-22, etc.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout).with_ansi(true))
        .with(file_layer(log_dir, "info.log", LevelFilter::INFO))
        .with(file_layer(log_dir, "warn.log", LevelFilter::WARN))
        .with(file_layer(log_dir, "error.log", LevelFilter::ERROR))
        .with(file_layer(log_dir, "debug.log", LevelFilter::DEBUG))
        .init();
    Ok(())
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = config::Config::from_env().map_err(std::io::Error::other)?;

    init_tracing(&config.log_dir)?;

    info!("Starting job-crafter");
    info!("Configuration loaded successfully:");
    info!("  - Environment: {:?}", config.environment);
    info!("  - Database: {}", config.database_name);
    info!("  - Allowed origins: {}", config.cors_origins.join(", "));
    info!("  - Max payload size: {} bytes", config.max_payload_size);

    // Routes are only served once the store has answered a ping
    let database_uri = config.database_uri().map_err(std::io::Error::other)?;
    let store: Arc<dyn DocumentStore> = match db::connection::connect(&database_uri, &config.database_name).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Error connecting to MongoDB: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let state = AppState::new(
        store.clone(),
        TokenSigner::new(&config.access_token_secret),
        CookieSettings::for_environment(config.environment),
        config.max_payload_size,
    );
    let origins = config.cors_origins.clone();

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("JobCrafter server is running on http://{}:{}", config.host, config.port);

    // Get server handle for graceful shutdown
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}
