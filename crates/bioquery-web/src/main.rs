//! Bioquery web server.
//!
//! Run with: cargo run -p bioquery-web

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = bioquery_web::config::AppConfig::from_env()?;
    info!("starting bioquery web server");

    let state = bioquery_web::state::AppState::new(&config)?;
    state.refresh_sources().await;

    let app = bioquery_web::router::build_router(state);

    info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
