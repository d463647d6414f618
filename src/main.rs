use std::{env, sync::Arc};

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marcomotion_api::{
    background_task::start_maintenance_task,
    db::sqlite::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::{config_extractors, configure_routes},
    settings::AppConfig,
    storage::local::LocalMediaStorage,
    AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("APP_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    let storage = LocalMediaStorage::new(&config.media_dir, &config.media_base_url);
    if let Err(e) = storage.init().await {
        tracing::error!("Failed to prepare media directory {:?}: {}", config.media_dir, e);
        std::process::exit(1);
    }

    let app_state = web::Data::new(AppState::new(&config, pool, Arc::new(storage)));

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if let Err(e) = app_state.auth_handler.ensure_admin(username, password).await {
            tracing::error!("Failed to create bootstrap admin: {}", e);
            std::process::exit(1);
        }
    }

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting MarcoMotion API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let max_upload_bytes = config.max_upload_bytes;
    let server_state = app_state.clone();
    let server_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .configure(config_extractors(max_upload_bytes))
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&server_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_maintenance_task(app_state.clone()));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
