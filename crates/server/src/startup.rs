use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{
    self,
    auth::{AuthSettings, ServerState},
};
use crate::session::SessionStore;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: load config, connect, migrate, build the app and run
/// the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let db = models::db::connect(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState {
        db,
        sessions: SessionStore::new(cfg.auth.session_ttl_hours),
        auth: AuthSettings {
            token_ttl_hours: cfg.auth.token_ttl_hours,
            session_ttl_hours: cfg.auth.session_ttl_hours,
            secure_cookies: cfg.auth.secure_cookies,
        },
    };

    let app: Router = routes::build_router(build_cors(), state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting acrodex server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
