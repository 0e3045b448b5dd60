use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use salonbook::config::{Config, LogFormat, ServerConfig};
use salonbook::middleware::{query_config, ApiKeyAuth, RateLimiter, RequestId};
use salonbook::modules::{configure_api, health};
use salonbook::reports::{MySqlReportStore, ReportService};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "salonbook=debug,actix_web=info".into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn cors(server: &ServerConfig) -> Cors {
    server
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.app.log_format);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting salon reporting service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations applied");
    }

    let clock = config.clock()?;
    let report_service = web::Data::new(ReportService::new(Arc::new(MySqlReportStore::new(
        db_pool,
    ))));
    let clock = web::Data::new(clock);
    let auth = ApiKeyAuth::new(config.security.api_key_hashes.clone());
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)?;
    let server_config = config.server.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(report_service.clone())
            .app_data(clock.clone())
            .app_data(query_config())
            .configure(health::configure)
            .configure(configure_api(rate_limiter.clone(), auth.clone()))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("HTTP server terminated with an error")
}
