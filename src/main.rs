use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use ttfashion_api::config::{init_tracing, load_config};
use ttfashion_api::db::{establish_connection, run_migrations};
use ttfashion_api::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.log_level, config.log_json);

    info!(
        environment = %config.environment,
        host = %config.host,
        port = config.port,
        "starting ttfashion-api"
    );

    let db = establish_connection(&config)
        .await
        .context("failed to connect to database")?;
    if config.auto_migrate {
        run_migrations(&db).await.context("migrations failed")?;
        info!("migrations applied");
    }

    let state = AppState::new(Arc::new(db));
    let cors = cors_layer(&config)?;
    let app = app_router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn cors_layer(config: &ttfashion_api::config::AppConfig) -> anyhow::Result<CorsLayer> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ];

    if let Some(origins) = &config.cors_allowed_origins {
        let parsed: Result<Vec<HeaderValue>, _> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(HeaderValue::from_str)
            .collect();
        let parsed = parsed.context("invalid CORS origin")?;
        Ok(CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(methods)
            .allow_headers(Any))
    } else if config.is_development() {
        Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any))
    } else {
        anyhow::bail!("cors_allowed_origins must be set outside development")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
