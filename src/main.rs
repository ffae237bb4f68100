use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use alumninet_backend::{
    background_task::start_purge_task,
    constants::SHUTDOWN_TIMEOUT_SECS,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::{shutdown_signal, stop_on},
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = match create_pool(&config.database_url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.run_migrations {
        if let Err(e) = run_migrations(&pool).await {
            tracing::error!("Migrations failed: {}", e);
            std::process::exit(1);
        }
        tracing::info!("Database migrations applied");
    }

    let app_state = web::Data::new(AppState::new(&config, pool));

    let server_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins();

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let purge_repo = app_state.auth_handler.user_repo.clone();
    let eviction = app_state.auth_limiter.spawn_eviction();

    let server_state = app_state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .bind(server_addr)?
    .run();

    tokio::spawn(start_purge_task(purge_repo));
    tokio::spawn(stop_on(shutdown_signal(), server.handle()));

    let result = server.await;

    eviction.abort();
    tracing::info!("Server stopped");
    result
}
